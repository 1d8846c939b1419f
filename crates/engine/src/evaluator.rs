//! Parameter and rule evaluators
//!
//! Evaluation is total: a missing field, or a dynamic field of the wrong
//! kind, is a non-match and never an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fraudguard_core::{
    literal_decimal, Condition, ParameterValue, Rule, RuleParameter, Transaction,
};

use crate::field::{resolve, FieldValue};
use crate::scoring::SeverityWeights;

/// Outcome of evaluating one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOutcome {
    pub matched: bool,
    pub score_contribution: u8,
}

impl RuleOutcome {
    pub const NO_MATCH: RuleOutcome = RuleOutcome {
        matched: false,
        score_contribution: 0,
    };
}

/// Parameter evaluator
pub struct ParameterEvaluator;

impl ParameterEvaluator {
    /// Evaluate one parameter against a transaction
    pub fn evaluate(parameter: &RuleParameter, tx: &Transaction) -> bool {
        match resolve(parameter, tx) {
            Some(field) => Self::apply(parameter, field),
            None => {
                tracing::debug!(
                    transaction_id = %tx.id,
                    parameter = %parameter.name,
                    parameter_type = %parameter.parameter_type,
                    "Transaction field absent, parameter does not match"
                );
                false
            }
        }
    }

    fn apply(parameter: &RuleParameter, field: FieldValue<'_>) -> bool {
        let value = &parameter.value;

        match (parameter.condition, field) {
            (Condition::Equals, FieldValue::Number(n)) => number(value) == Some(n),
            (Condition::Equals, FieldValue::Text { value: text, case_insensitive }) => value
                .as_text()
                .is_some_and(|expected| text_equals(text, expected, case_insensitive)),
            (Condition::Equals, FieldValue::Bool(b)) => value.as_bool() == Some(b),

            (Condition::GreaterThan, FieldValue::Number(n)) => number(value).is_some_and(|v| n > v),
            (Condition::LessThan, FieldValue::Number(n)) => number(value).is_some_and(|v| n < v),

            (Condition::Contains, FieldValue::Text { value: text, case_insensitive }) => value
                .as_text()
                .is_some_and(|needle| text_contains(text, needle, case_insensitive)),
            (Condition::NotContains, FieldValue::Text { value: text, case_insensitive }) => value
                .as_text()
                .is_some_and(|needle| !text_contains(text, needle, case_insensitive)),

            (Condition::IsTrue, FieldValue::Bool(b)) => b,
            (Condition::IsFalse, FieldValue::Bool(b)) => !b,

            (Condition::InRange, FieldValue::Number(n)) => {
                let low = number(value);
                let high = parameter.threshold.and_then(literal_decimal);
                match (low, high) {
                    (Some(low), Some(high)) => low <= n && n <= high,
                    _ => false,
                }
            }

            // Only reachable for `other` parameters whose field kind differs per transaction
            _ => false,
        }
    }
}

fn number(value: &ParameterValue) -> Option<Decimal> {
    value.as_number().and_then(literal_decimal)
}

fn text_equals(field: &str, expected: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        field.to_lowercase() == expected.to_lowercase()
    } else {
        field == expected
    }
}

fn text_contains(field: &str, needle: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        field.to_lowercase().contains(&needle.to_lowercase())
    } else {
        field.contains(needle)
    }
}

/// Rule evaluator
///
/// A rule matches iff every parameter matches. A match contributes the
/// weight of the rule's severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEvaluator {
    weights: SeverityWeights,
}

impl RuleEvaluator {
    pub fn new(weights: SeverityWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &SeverityWeights {
        &self.weights
    }

    /// Evaluate a single rule; disabled rules never match
    pub fn evaluate(&self, rule: &Rule, tx: &Transaction) -> RuleOutcome {
        if !rule.enabled {
            return RuleOutcome::NO_MATCH;
        }

        let matched = !rule.parameters.is_empty()
            && rule
                .parameters
                .iter()
                .all(|parameter| ParameterEvaluator::evaluate(parameter, tx));

        if matched {
            RuleOutcome {
                matched: true,
                score_contribution: self.weights.weight(rule.severity),
            }
        } else {
            RuleOutcome::NO_MATCH
        }
    }
}
