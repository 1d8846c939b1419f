//! Rule filtering and summary statistics for the management surface

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use fraudguard_core::{Rule, Severity};

/// Free-text and severity filter; only built through [`RuleQuery::new`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleQuery {
    /// Lowercased search term; empty matches every rule
    term: String,
    severity: Option<Severity>,
}

impl RuleQuery {
    pub fn new(term: &str, severity: Option<Severity>) -> Self {
        Self {
            term: term.trim().to_lowercase(),
            severity,
        }
    }

    pub fn matches(&self, rule: &Rule) -> bool {
        let term_matches = self.term.is_empty()
            || rule.name.to_lowercase().contains(&self.term)
            || rule.description.to_lowercase().contains(&self.term);
        let severity_matches = self.severity.map_or(true, |s| rule.severity == s);

        term_matches && severity_matches
    }
}

/// Rule counts for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    /// Every severity is present, with zero when unused
    pub by_severity: BTreeMap<Severity, usize>,
}

impl RuleSummary {
    pub fn from_rules<'r>(rules: impl IntoIterator<Item = &'r Rule>) -> Self {
        let mut by_severity: BTreeMap<Severity, usize> = Severity::iter().map(|s| (s, 0)).collect();
        let mut total = 0;
        let mut enabled = 0;

        for rule in rules {
            total += 1;
            if rule.enabled {
                enabled += 1;
            }
            *by_severity.entry(rule.severity).or_insert(0) += 1;
        }

        Self {
            total,
            enabled,
            disabled: total - enabled,
            by_severity,
        }
    }

    /// Share of rules with the given severity, in percent
    pub fn severity_share(&self, severity: Severity) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = self.by_severity.get(&severity).copied().unwrap_or(0);
        count as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fraudguard_core::{Condition, ParameterDraft, ParameterType, RuleDraft};

    fn rule(name: &str, description: &str, severity: Severity) -> Rule {
        RuleDraft::new(name, severity)
            .description(description)
            .parameter(ParameterDraft::new(
                "Amount",
                ParameterType::Amount,
                Condition::GreaterThan,
                1.0,
            ))
            .into_rule(Utc::now())
            .unwrap()
    }

    #[test]
    fn test_term_matches_name_or_description() {
        let r = rule("High Value Transaction", "Flag unusually high amounts", Severity::High);

        assert!(RuleQuery::new("value", None).matches(&r));
        assert!(RuleQuery::new("UNUSUALLY", None).matches(&r));
        assert!(!RuleQuery::new("device", None).matches(&r));
    }

    #[test]
    fn test_term_is_normalized() {
        let r = rule("Rapid Succession Transactions", "", Severity::Medium);

        assert!(RuleQuery::new("Rapid", None).matches(&r));
        assert!(RuleQuery::new("  SUCCESSION ", None).matches(&r));
        assert_eq!(RuleQuery::new(" Rapid ", None), RuleQuery::new("rapid", None));
    }

    #[test]
    fn test_empty_term_matches_all() {
        let r = rule("Anything", "", Severity::Low);
        assert!(RuleQuery::default().matches(&r));
        assert!(RuleQuery::new("  ", None).matches(&r));
    }

    #[test]
    fn test_severity_filter() {
        let r = rule("Device", "Many accounts", Severity::Critical);

        assert!(RuleQuery::new("", Some(Severity::Critical)).matches(&r));
        assert!(!RuleQuery::new("", Some(Severity::High)).matches(&r));
        assert!(!RuleQuery::new("device", Some(Severity::Low)).matches(&r));
    }

    #[test]
    fn test_summary() {
        let mut off = rule("C", "", Severity::Critical);
        off.enabled = false;
        let rules = vec![
            rule("A", "", Severity::High),
            rule("B", "", Severity::Medium),
            off,
        ];

        let summary = RuleSummary::from_rules(&rules);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.enabled, 2);
        assert_eq!(summary.disabled, 1);
        assert_eq!(summary.by_severity[&Severity::Low], 0);
        assert_eq!(summary.by_severity[&Severity::Critical], 1);
        assert!((summary.severity_share(Severity::High) - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RuleSummary::from_rules(&Vec::<Rule>::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.by_severity.len(), 4);
        assert_eq!(summary.severity_share(Severity::Low), 0.0);
    }
}
