//! Rule errors

use thiserror::Error;

use crate::parameter::{Condition, ParameterType, ValueKind};

/// Reasons a rule or parameter is rejected at create/update time
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Rule name must not be empty")]
    EmptyName,

    #[error("Rule must have at least one parameter")]
    NoParameters,

    #[error("Parameter {0} has an empty name")]
    EmptyParameterName(String),

    #[error("Duplicate parameter id within rule: {0}")]
    DuplicateParameterId(String),

    #[error("Parameter {parameter}: numeric values must be finite")]
    NonFiniteNumber { parameter: String },

    #[error("Parameter {parameter}: condition {condition} expects a {expected} value, got {found}")]
    IncompatibleValue {
        parameter: String,
        condition: Condition,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Parameter {parameter}: condition {condition} cannot be applied to a {parameter_type} field")]
    IncompatibleField {
        parameter: String,
        condition: Condition,
        parameter_type: ParameterType,
    },

    #[error("Parameter {parameter}: {value} is outside the supported decimal range")]
    NumberOutOfRange { parameter: String, value: f64 },

    #[error("Parameter {parameter}: in_range requires a numeric threshold")]
    MissingThreshold { parameter: String },

    #[error("Parameter {parameter}: range lower bound {low} exceeds upper bound {high}")]
    InvertedRange {
        parameter: String,
        low: f64,
        high: f64,
    },

    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),

    #[error("Unknown parameter type: {0}")]
    UnknownParameterType(String),

    #[error("Unknown condition: {0}")]
    UnknownCondition(String),
}

/// Errors from rule management operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Rule not found: {0}")]
    NotFound(String),
}

/// Result type for rule operations
pub type RuleResult<T> = Result<T, RuleError>;
