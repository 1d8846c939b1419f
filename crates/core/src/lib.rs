//! FraudGuard core domain types
//!
//! ## Key Components
//!
//! - [`rule::Rule`] - A named conjunction of parameter conditions with a [`rule::Severity`]
//! - [`parameter::RuleParameter`] - One typed condition (field, comparator, literal)
//! - [`transaction::Transaction`] - The payload a rule set is evaluated against
//! - [`validation`] - Save-time checks; a stored rule is always evaluable
//!
//! Rules are built from [`rule::RuleDraft`] and changed through
//! [`rule::RuleUpdate`], both of which validate before producing a [`rule::Rule`].

pub mod error;
pub mod parameter;
pub mod rule;
pub mod transaction;
pub mod validation;

pub use error::{RuleError, RuleResult, ValidationError};
pub use parameter::{
    literal_decimal, Condition, FieldKind, ParameterDraft, ParameterType, ParameterValue,
    RuleParameter, ValueKind,
};
pub use rule::{Rule, RuleDraft, RuleUpdate, Severity};
pub use transaction::Transaction;
pub use validation::{validate_parameter, validate_parameters, validate_rule};
