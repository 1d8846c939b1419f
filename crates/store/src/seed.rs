//! Default detection rules loaded into a fresh store

use fraudguard_core::{Condition, ParameterDraft, ParameterType, RuleDraft, Severity};

/// The three starter rules, in display order.
///
/// "Multiple Accounts per Device" ships disabled. Counts that the engine does
/// not track itself (accounts per device, the burst window) are read from
/// transaction attributes.
pub fn default_rules() -> Vec<RuleDraft> {
    vec![
        RuleDraft::new("High Value Transaction", Severity::High)
            .description("Flag transactions with unusually high amounts")
            .parameter(ParameterDraft::new(
                "Transaction Amount",
                ParameterType::Amount,
                Condition::GreaterThan,
                5000.0,
            )),
        RuleDraft::new("Rapid Succession Transactions", Severity::Medium)
            .description("Detect multiple transactions from the same device within minutes")
            .parameter(ParameterDraft::new(
                "Transaction Count",
                ParameterType::Frequency,
                Condition::GreaterThan,
                3.0,
            ))
            .parameter(ParameterDraft::new(
                "windowMinutes",
                ParameterType::Other,
                Condition::LessThan,
                5.0,
            )),
        RuleDraft::new("Multiple Accounts per Device", Severity::Critical)
            .description("Detect when multiple user accounts use the same device")
            .parameter(ParameterDraft::new(
                "accountsPerDevice",
                ParameterType::Other,
                Condition::GreaterThan,
                2.0,
            ))
            .disabled(),
    ]
}
