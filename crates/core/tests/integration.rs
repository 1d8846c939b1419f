//! Integration tests for rule drafting, validation and the JSON surface

use chrono::Utc;

use fraudguard_core::{
    Condition, ParameterDraft, ParameterType, ParameterValue, Rule, RuleDraft, RuleUpdate,
    Severity, ValidationError, ValueKind,
};

fn draft_from_json(json: &str) -> RuleDraft {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_every_condition_validates_with_matching_value() {
    let cases: Vec<(ParameterType, Condition, ParameterValue)> = vec![
        (ParameterType::Amount, Condition::Equals, ParameterValue::Number(10.0)),
        (ParameterType::Amount, Condition::GreaterThan, ParameterValue::Number(10.0)),
        (ParameterType::Frequency, Condition::LessThan, ParameterValue::Number(3.0)),
        (ParameterType::Location, Condition::Contains, "US".into()),
        (ParameterType::Device, Condition::NotContains, "emu".into()),
        (ParameterType::Other, Condition::IsTrue, ParameterValue::Bool(true)),
        (ParameterType::Other, Condition::IsFalse, ParameterValue::Bool(true)),
    ];

    for (parameter_type, condition, value) in cases {
        let result = RuleDraft::new("Rule", Severity::Low)
            .parameter(ParameterDraft::new("Field", parameter_type, condition, value))
            .into_rule(Utc::now());
        assert!(result.is_ok(), "{} / {}", parameter_type, condition);
    }
}

#[test]
fn test_condition_value_mismatch_rejected() {
    let result = RuleDraft::new("Rule", Severity::Low)
        .parameter(ParameterDraft::new(
            "Amount",
            ParameterType::Amount,
            Condition::GreaterThan,
            "lots",
        ))
        .into_rule(Utc::now());

    assert!(matches!(
        result,
        Err(ValidationError::IncompatibleValue {
            expected: ValueKind::Number,
            found: ValueKind::Text,
            ..
        })
    ));
}

#[test]
fn test_in_range_json() {
    let ok = draft_from_json(
        r#"{
            "name": "Mid band",
            "severity": "medium",
            "parameters": [
                { "name": "Amount", "type": "amount", "condition": "in_range", "value": 100, "threshold": 500 }
            ]
        }"#,
    );
    assert!(ok.into_rule(Utc::now()).is_ok());

    let missing = draft_from_json(
        r#"{
            "name": "No upper bound",
            "severity": "medium",
            "parameters": [
                { "name": "Amount", "type": "amount", "condition": "in_range", "value": 100 }
            ]
        }"#,
    );
    assert!(matches!(
        missing.into_rule(Utc::now()),
        Err(ValidationError::MissingThreshold { .. })
    ));
}

#[test]
fn test_unknown_enum_text_rejected_at_parse() {
    let result: Result<RuleDraft, _> = serde_json::from_str(
        r#"{ "name": "X", "severity": "extreme", "parameters": [] }"#,
    );
    assert!(result.is_err());

    assert!(matches!(
        Condition::parse("between"),
        Err(ValidationError::UnknownCondition(_))
    ));
    assert!(matches!(
        ParameterType::parse("velocity"),
        Err(ValidationError::UnknownParameterType(_))
    ));
}

#[test]
fn test_supplied_parameter_ids_kept_and_must_be_unique() {
    let rule = RuleDraft::new("Ids", Severity::Low)
        .parameter(
            ParameterDraft::new("A", ParameterType::Amount, Condition::GreaterThan, 1.0)
                .with_id("param-a"),
        )
        .parameter(ParameterDraft::new("B", ParameterType::Amount, Condition::LessThan, 9.0))
        .into_rule(Utc::now())
        .unwrap();
    assert_eq!(rule.parameters[0].id, "param-a");
    assert!(rule.parameters[1].id.starts_with("param-"));

    let duplicate = RuleUpdate::new()
        .parameters(vec![
            ParameterDraft::new("A", ParameterType::Amount, Condition::GreaterThan, 1.0)
                .with_id("param-a"),
            ParameterDraft::new("B", ParameterType::Amount, Condition::LessThan, 9.0)
                .with_id("param-a"),
        ])
        .apply(&rule, Utc::now());
    assert_eq!(
        duplicate,
        Err(ValidationError::DuplicateParameterId("param-a".to_string()))
    );
}

#[test]
fn test_out_of_range_literals_rejected_on_save() {
    let below = draft_from_json(
        r#"{
            "name": "Everything below",
            "severity": "low",
            "parameters": [
                { "name": "Amount", "type": "amount", "condition": "less_than", "value": 1e30 }
            ]
        }"#,
    );
    assert!(matches!(
        below.into_rule(Utc::now()),
        Err(ValidationError::NumberOutOfRange { .. })
    ));

    let band = draft_from_json(
        r#"{
            "name": "Open band",
            "severity": "low",
            "parameters": [
                { "name": "Amount", "type": "amount", "condition": "in_range", "value": 0, "threshold": 1e30 }
            ]
        }"#,
    );
    assert!(matches!(
        band.into_rule(Utc::now()),
        Err(ValidationError::NumberOutOfRange { .. })
    ));
}

#[test]
fn test_rule_round_trips_through_json() {
    let rule = RuleDraft::new("Round trip", Severity::Critical)
        .description("Every field survives")
        .parameter(ParameterDraft::in_range("Hour", ParameterType::Time, 1.0, 4.0))
        .disabled()
        .into_rule(Utc::now())
        .unwrap();

    let json = serde_json::to_string(&rule).unwrap();
    assert!(json.contains("\"type\":\"time\""));
    assert!(json.contains("\"condition\":\"in_range\""));

    let parsed: Rule = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, rule);
}
