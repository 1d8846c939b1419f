//! Save-time validation of rules and parameters
//!
//! Everything that could make a parameter meaningless at evaluation time is
//! rejected here, so evaluation itself never has to fail.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::parameter::{
    literal_decimal, Condition, FieldKind, ParameterValue, RuleParameter, ValueKind,
};
use crate::rule::Rule;

/// Validate a complete rule
pub fn validate_rule(rule: &Rule) -> Result<(), ValidationError> {
    if rule.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    validate_parameters(&rule.parameters)
}

/// Validate a parameter list: non-empty, unique ids, each parameter valid
pub fn validate_parameters(parameters: &[RuleParameter]) -> Result<(), ValidationError> {
    if parameters.is_empty() {
        return Err(ValidationError::NoParameters);
    }

    let mut seen = HashSet::with_capacity(parameters.len());
    for parameter in parameters {
        if !seen.insert(parameter.id.as_str()) {
            return Err(ValidationError::DuplicateParameterId(parameter.id.clone()));
        }
        validate_parameter(parameter)?;
    }
    Ok(())
}

/// Validate a single parameter against the condition/value/field table
pub fn validate_parameter(parameter: &RuleParameter) -> Result<(), ValidationError> {
    let label = || parameter.id.clone();

    if parameter.name.trim().is_empty() {
        return Err(ValidationError::EmptyParameterName(label()));
    }

    if let ParameterValue::Number(n) = parameter.value {
        if !n.is_finite() {
            return Err(ValidationError::NonFiniteNumber { parameter: label() });
        }
        if literal_decimal(n).is_none() {
            return Err(ValidationError::NumberOutOfRange {
                parameter: label(),
                value: n,
            });
        }
    }

    let found = parameter.value.kind();
    if let Some(expected) = parameter.condition.required_value_kind() {
        if expected != found {
            return Err(ValidationError::IncompatibleValue {
                parameter: label(),
                condition: parameter.condition,
                expected,
                found,
            });
        }
    }

    check_field(parameter, found)?;

    if parameter.condition == Condition::InRange {
        let low = parameter.value.as_number().unwrap_or_default();
        let high = match parameter.threshold {
            Some(high) if high.is_finite() => high,
            Some(_) => return Err(ValidationError::NonFiniteNumber { parameter: label() }),
            None => return Err(ValidationError::MissingThreshold { parameter: label() }),
        };
        if literal_decimal(high).is_none() {
            return Err(ValidationError::NumberOutOfRange {
                parameter: label(),
                value: high,
            });
        }
        if low > high {
            return Err(ValidationError::InvertedRange {
                parameter: label(),
                low,
                high,
            });
        }
    }

    Ok(())
}

/// The selected field must be able to carry a value the condition can test
fn check_field(parameter: &RuleParameter, value_kind: ValueKind) -> Result<(), ValidationError> {
    let compatible = match parameter.parameter_type.field_kind() {
        FieldKind::Dynamic => true,
        FieldKind::Numeric => value_kind == ValueKind::Number,
        FieldKind::Text => value_kind == ValueKind::Text,
    };

    if compatible {
        Ok(())
    } else {
        Err(ValidationError::IncompatibleField {
            parameter: parameter.id.clone(),
            condition: parameter.condition,
            parameter_type: parameter.parameter_type,
        })
    }
}
