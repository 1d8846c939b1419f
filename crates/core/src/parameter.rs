//! Rule parameters: one typed condition (field, comparator, literal) within a rule

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ValidationError;

/// Semantic category of the transaction field a parameter tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// Transaction amount
    Amount,
    /// Caller-supplied count of recent transactions
    Frequency,
    /// Device identifier
    Device,
    /// Caller-supplied behavioural drift score
    Drift,
    /// Transaction location
    Location,
    /// Hour of day of the transaction timestamp (UTC)
    Time,
    /// Any other field, looked up by parameter name
    Other,
}

/// Kind of value a transaction field yields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Text,
    /// Resolved per transaction; the kind is only known at evaluation time
    Dynamic,
}

impl ParameterType {
    /// Kind of the field selected by this parameter type
    pub fn field_kind(&self) -> FieldKind {
        match self {
            ParameterType::Amount
            | ParameterType::Frequency
            | ParameterType::Drift
            | ParameterType::Time => FieldKind::Numeric,
            ParameterType::Device | ParameterType::Location => FieldKind::Text,
            ParameterType::Other => FieldKind::Dynamic,
        }
    }

    /// Device and location identifiers compare case-insensitively
    pub fn is_case_insensitive(&self) -> bool {
        matches!(self, ParameterType::Device | ParameterType::Location)
    }

    /// Parse from text, reporting unknown values as a validation error
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        Self::from_str(text).map_err(|_| ValidationError::UnknownParameterType(text.to_string()))
    }
}

/// Comparator applied between the selected field and the parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Equals,
    GreaterThan,
    LessThan,
    Contains,
    NotContains,
    IsTrue,
    IsFalse,
    /// `value <= field <= threshold`
    InRange,
}

impl Condition {
    /// Value kind the literal must have for this condition.
    ///
    /// `None` means any kind is accepted (only `equals`).
    pub fn required_value_kind(&self) -> Option<ValueKind> {
        match self {
            Condition::Equals => None,
            Condition::GreaterThan | Condition::LessThan | Condition::InRange => {
                Some(ValueKind::Number)
            }
            Condition::Contains | Condition::NotContains => Some(ValueKind::Text),
            Condition::IsTrue | Condition::IsFalse => Some(ValueKind::Boolean),
        }
    }

    /// Parse from text, reporting unknown values as a validation error
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        Self::from_str(text).map_err(|_| ValidationError::UnknownCondition(text.to_string()))
    }
}

/// Kind of a parameter literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ValueKind {
    Number,
    Text,
    Boolean,
}

/// Typed literal compared against a transaction field
///
/// Serialized untagged so JSON literals map directly:
/// `5000` is a number, `"US"` is text, `true` is a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ParameterValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ParameterValue::Bool(_) => ValueKind::Boolean,
            ParameterValue::Number(_) => ValueKind::Number,
            ParameterValue::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParameterValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Exact decimal for a rule literal, `None` when it cannot be represented.
///
/// The extreme values `Decimal::MAX` and `Decimal::MIN` are excluded, so a
/// saturated transaction value always lies strictly beyond every literal.
pub fn literal_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).filter(|d| d.abs() < Decimal::MAX)
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

/// A single condition within a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleParameter {
    /// Unique within the owning rule
    pub id: String,
    /// Label; for `other` parameters also the field name to look up
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub condition: Condition,
    pub value: ParameterValue,
    /// Upper bound, used only by `in_range`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

/// Parameter as submitted by a caller; the id is optional and assigned on save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub condition: Condition,
    pub value: ParameterValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl ParameterDraft {
    /// Create a draft without a threshold
    pub fn new(
        name: impl Into<String>,
        parameter_type: ParameterType,
        condition: Condition,
        value: impl Into<ParameterValue>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            parameter_type,
            condition,
            value: value.into(),
            threshold: None,
        }
    }

    /// `lower <= field <= upper`
    pub fn in_range(
        name: impl Into<String>,
        parameter_type: ParameterType,
        lower: f64,
        upper: f64,
    ) -> Self {
        Self {
            threshold: Some(upper),
            ..Self::new(name, parameter_type, Condition::InRange, lower)
        }
    }

    /// Keep a caller-chosen id instead of generating one
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Materialize into a parameter, generating an id when none was given
    pub fn into_parameter(self) -> RuleParameter {
        RuleParameter {
            id: self
                .id
                .unwrap_or_else(|| format!("param-{}", uuid::Uuid::new_v4())),
            name: self.name,
            parameter_type: self.parameter_type,
            condition: self.condition,
            value: self.value,
            threshold: self.threshold,
        }
    }
}

impl From<RuleParameter> for ParameterDraft {
    fn from(parameter: RuleParameter) -> Self {
        Self {
            id: Some(parameter.id),
            name: parameter.name,
            parameter_type: parameter.parameter_type,
            condition: parameter.condition,
            value: parameter.value,
            threshold: parameter.threshold,
        }
    }
}
