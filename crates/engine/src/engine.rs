//! Risk Engine - aggregates rule outcomes into one risk score
//!
//! Runs every enabled rule against a transaction, sums the contributions of
//! the matched ones and saturates at 100. Evaluation is a read-only pass over
//! the rules it is given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fraudguard_core::{Rule, Transaction};

use crate::config::EngineConfig;
use crate::evaluator::{RuleEvaluator, RuleOutcome};
use crate::scoring::{RiskLevel, SeverityWeights};

/// Result of evaluating a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub transaction_id: String,
    /// Aggregate score in `0..=100`
    pub risk_score: u8,
    pub flagged: bool,
    pub risk_level: RiskLevel,
    /// Matched rules, in the order they were evaluated
    pub triggered_rules: Vec<Rule>,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationResult {
    /// Ids of the triggered rules
    pub fn triggered_rule_ids(&self) -> Vec<&str> {
        self.triggered_rules.iter().map(|r| r.id.as_str()).collect()
    }
}

/// Main Risk Engine
pub struct RiskEngine {
    config: EngineConfig,
    evaluator: RuleEvaluator,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RiskEngine {
    /// Create an engine from an already validated configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            evaluator: RuleEvaluator::new(config.severity_weights),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a single rule (matched flag and score contribution)
    pub fn evaluate_rule(&self, rule: &Rule, tx: &Transaction) -> RuleOutcome {
        self.evaluator.evaluate(rule, tx)
    }

    /// Evaluate all enabled rules against a transaction
    pub fn evaluate_all<'r>(
        &self,
        rules: impl IntoIterator<Item = &'r Rule>,
        tx: &Transaction,
    ) -> EvaluationResult {
        let mut triggered_rules = Vec::new();
        let mut contributions = Vec::new();

        for rule in rules.into_iter().filter(|r| r.enabled) {
            let outcome = self.evaluator.evaluate(rule, tx);
            if outcome.matched {
                tracing::debug!(
                    transaction_id = %tx.id,
                    rule_id = %rule.id,
                    severity = %rule.severity,
                    contribution = outcome.score_contribution,
                    "Rule matched"
                );
                contributions.push(outcome.score_contribution);
                triggered_rules.push(rule.clone());
            }
        }

        let risk_score = SeverityWeights::aggregate(contributions);
        let flagged = self
            .config
            .flag_policy
            .is_flagged(risk_score, triggered_rules.len());
        let risk_level = self.config.risk_bands.classify(risk_score);

        tracing::debug!(
            transaction_id = %tx.id,
            risk_score,
            flagged,
            triggered = triggered_rules.len(),
            "Transaction evaluated"
        );

        EvaluationResult {
            transaction_id: tx.id.clone(),
            risk_score,
            flagged,
            risk_level,
            triggered_rules,
            timestamp: Utc::now(),
        }
    }

    /// Evaluate one rule and report it in the same shape as [`Self::evaluate_all`]
    pub fn evaluate_single(&self, rule: &Rule, tx: &Transaction) -> EvaluationResult {
        self.evaluate_all(std::iter::once(rule), tx)
    }
}
