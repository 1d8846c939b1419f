//! Transaction field selection
//!
//! Maps a parameter's type (and, for `other`, its name) to the transaction
//! value the condition is applied to.

use chrono::Timelike;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use fraudguard_core::{ParameterType, ParameterValue, RuleParameter, Transaction};

/// A resolved transaction field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(Decimal),
    Text { value: &'a str, case_insensitive: bool },
    Bool(bool),
}

impl<'a> FieldValue<'a> {
    fn text(value: &'a str, case_insensitive: bool) -> Self {
        FieldValue::Text {
            value,
            case_insensitive,
        }
    }

    fn from_attribute(value: &'a ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Number(n) => saturating_decimal(*n).map(FieldValue::Number),
            ParameterValue::Text(s) => Some(FieldValue::text(s, false)),
            ParameterValue::Bool(b) => Some(FieldValue::Bool(*b)),
        }
    }
}

/// Resolve the field a parameter tests; `None` when the transaction lacks it
pub fn resolve<'a>(parameter: &RuleParameter, tx: &'a Transaction) -> Option<FieldValue<'a>> {
    match parameter.parameter_type {
        ParameterType::Amount => Some(FieldValue::Number(tx.amount)),
        ParameterType::Frequency => tx.frequency.map(|n| FieldValue::Number(Decimal::from(n))),
        ParameterType::Drift => tx
            .drift_score
            .and_then(saturating_decimal)
            .map(FieldValue::Number),
        ParameterType::Time => Some(FieldValue::Number(Decimal::from(tx.timestamp.hour()))),
        ParameterType::Device => tx.device_id.as_deref().map(|s| FieldValue::text(s, true)),
        ParameterType::Location => tx.location.as_deref().map(|s| FieldValue::text(s, true)),
        ParameterType::Other => resolve_named(&parameter.name, tx),
    }
}

/// Named standard fields first, then caller-supplied attributes
fn resolve_named<'a>(name: &str, tx: &'a Transaction) -> Option<FieldValue<'a>> {
    let standard = match normalize(name).as_str() {
        "paymentmethod" => Some(&tx.payment_method),
        "ipaddress" => Some(&tx.ip_address),
        "userid" => Some(&tx.user_id),
        "merchantid" => Some(&tx.merchant_id),
        _ => None,
    };

    match standard {
        Some(field) => field.as_deref().map(|s| FieldValue::text(s, false)),
        None => tx.attributes.get(name).and_then(FieldValue::from_attribute),
    }
}

/// Transaction-supplied floats beyond the decimal range clamp to its bounds.
/// Rule literals stay strictly inside them, so ordering is preserved; NaN
/// counts as absent.
fn saturating_decimal(n: f64) -> Option<Decimal> {
    if n.is_nan() {
        return None;
    }
    Some(Decimal::from_f64(n).unwrap_or(if n > 0.0 { Decimal::MAX } else { Decimal::MIN }))
}

/// `paymentMethod`, `payment_method` and `Payment Method` all name the same field
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fraudguard_core::{Condition, ParameterDraft};
    use rust_decimal_macros::dec;

    fn param(name: &str, parameter_type: ParameterType) -> RuleParameter {
        ParameterDraft::new(name, parameter_type, Condition::Equals, "x").into_parameter()
    }

    #[test]
    fn test_standard_fields() {
        let tx = Transaction::new("tx-1", dec!(250))
            .at(Utc.with_ymd_and_hms(2024, 5, 1, 3, 15, 0).unwrap())
            .with_device("DEV-1")
            .with_frequency(4);

        assert_eq!(
            resolve(&param("a", ParameterType::Amount), &tx),
            Some(FieldValue::Number(dec!(250)))
        );
        assert_eq!(
            resolve(&param("t", ParameterType::Time), &tx),
            Some(FieldValue::Number(dec!(3)))
        );
        assert_eq!(
            resolve(&param("f", ParameterType::Frequency), &tx),
            Some(FieldValue::Number(dec!(4)))
        );
        assert_eq!(
            resolve(&param("d", ParameterType::Device), &tx),
            Some(FieldValue::Text { value: "DEV-1", case_insensitive: true })
        );
    }

    #[test]
    fn test_absent_optional_fields() {
        let tx = Transaction::new("tx-1", dec!(1));

        assert_eq!(resolve(&param("f", ParameterType::Frequency), &tx), None);
        assert_eq!(resolve(&param("d", ParameterType::Drift), &tx), None);
        assert_eq!(resolve(&param("l", ParameterType::Location), &tx), None);
        assert_eq!(resolve(&param("unknown", ParameterType::Other), &tx), None);
    }

    #[test]
    fn test_huge_values_saturate() {
        let tx = Transaction::new("tx-1", dec!(1))
            .with_drift_score(1e30)
            .with_attribute("exposure", -1e30)
            .with_attribute("bad", f64::NAN);

        assert_eq!(
            resolve(&param("d", ParameterType::Drift), &tx),
            Some(FieldValue::Number(Decimal::MAX))
        );
        assert_eq!(
            resolve(&param("exposure", ParameterType::Other), &tx),
            Some(FieldValue::Number(Decimal::MIN))
        );
        assert_eq!(resolve(&param("bad", ParameterType::Other), &tx), None);
    }

    #[test]
    fn test_other_resolves_named_fields() {
        let tx = Transaction::new("tx-1", dec!(1))
            .with_payment_method("crypto")
            .with_attribute("is_vpn", true);

        let expected = Some(FieldValue::Text { value: "crypto", case_insensitive: false });
        assert_eq!(resolve(&param("paymentMethod", ParameterType::Other), &tx), expected);
        assert_eq!(resolve(&param("payment_method", ParameterType::Other), &tx), expected);
        assert_eq!(
            resolve(&param("is_vpn", ParameterType::Other), &tx),
            Some(FieldValue::Bool(true))
        );
    }
}
