//! Fraud detector service: rule store plus risk engine behind one handle

use fraudguard_core::{RuleResult, Transaction};
use fraudguard_engine::{EvaluationResult, RiskEngine};

use crate::store::RuleStore;

/// Fraud Detector
///
/// Shared across threads behind an `Arc`; management calls and evaluations
/// may interleave freely.
#[derive(Default)]
pub struct FraudDetector {
    store: RuleStore,
    engine: RiskEngine,
}

impl FraudDetector {
    pub fn new(store: RuleStore, engine: RiskEngine) -> Self {
        Self { store, engine }
    }

    /// Seeded default rules with the default engine configuration
    pub fn with_defaults() -> RuleResult<Self> {
        Ok(Self::new(RuleStore::seeded()?, RiskEngine::default()))
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Evaluate a transaction against the rules enabled at call time
    pub fn evaluate(&self, tx: &Transaction) -> EvaluationResult {
        let rules = self.store.enabled_snapshot();
        let result = self.engine.evaluate_all(&rules, tx);

        if result.flagged {
            tracing::info!(
                transaction_id = %tx.id,
                risk_score = result.risk_score,
                triggered = ?result.triggered_rule_ids(),
                "Transaction flagged"
            );
        }
        result
    }

    /// Evaluate one rule in isolation; disabled rules report no match
    pub fn test_rule(&self, id: &str, tx: &Transaction) -> RuleResult<EvaluationResult> {
        let rule = self.store.get(id)?;
        Ok(self.engine.evaluate_single(&rule, tx))
    }
}
