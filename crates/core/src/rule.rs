//! Detection rules
//!
//! A rule is a named conjunction of parameter conditions with a severity.
//! Rules are only created and changed through drafts and updates so that
//! every stored rule has passed validation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ValidationError;
use crate::parameter::{ParameterDraft, RuleParameter};
use crate::validation::validate_rule;

/// Rule severity - ordered from lowest to highest
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parse from text, reporting values outside the enum as a validation error
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        Self::from_str(text).map_err(|_| ValidationError::UnknownSeverity(text.to_string()))
    }
}

/// A stored detection rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub severity: Severity,
    pub parameters: Vec<RuleParameter>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Rule {
    /// Bump `modified_at`, never letting it move backwards or before `created_at`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modified_at = now.max(self.modified_at).max(self.created_at);
    }
}

fn default_enabled() -> bool {
    true
}

/// Rule as submitted for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub parameters: Vec<ParameterDraft>,
}

impl RuleDraft {
    /// Start a draft with no parameters (add at least one before saving)
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            severity,
            enabled: true,
            parameters: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn parameter(mut self, parameter: ParameterDraft) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Materialize a validated rule with a fresh id and `created_at = modified_at = now`
    pub fn into_rule(self, now: DateTime<Utc>) -> Result<Rule, ValidationError> {
        let rule = Rule {
            id: format!("rule-{}", uuid::Uuid::new_v4()),
            name: self.name,
            description: self.description,
            enabled: self.enabled,
            severity: self.severity,
            parameters: self
                .parameters
                .into_iter()
                .map(ParameterDraft::into_parameter)
                .collect(),
            created_at: now,
            modified_at: now,
        };
        validate_rule(&rule)?;
        Ok(rule)
    }
}

/// Partial update: only the supplied fields are replaced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterDraft>>,
}

impl RuleUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn parameters(mut self, parameters: Vec<ParameterDraft>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Produce the updated rule without touching the stored one.
    ///
    /// The candidate is validated as a whole; on error the caller keeps the
    /// stored rule unchanged.
    pub fn apply(self, rule: &Rule, now: DateTime<Utc>) -> Result<Rule, ValidationError> {
        let mut updated = rule.clone();

        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(description) = self.description {
            updated.description = description;
        }
        if let Some(enabled) = self.enabled {
            updated.enabled = enabled;
        }
        if let Some(severity) = self.severity {
            updated.severity = severity;
        }
        if let Some(parameters) = self.parameters {
            updated.parameters = parameters
                .into_iter()
                .map(ParameterDraft::into_parameter)
                .collect();
        }

        validate_rule(&updated)?;
        updated.touch(now);
        Ok(updated)
    }
}
