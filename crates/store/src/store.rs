//! In-memory rule store
//!
//! Owns the rule collection behind a single `RwLock`. Readers always receive
//! cloned snapshots, and writers replace a rule only after the candidate has
//! passed validation, so a reader never observes a half-written rule.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use fraudguard_core::{Rule, RuleDraft, RuleError, RuleResult, RuleUpdate, Severity};

use crate::query::{RuleQuery, RuleSummary};

/// Rule Store
#[derive(Debug, Default)]
pub struct RuleStore {
    rules: RwLock<Vec<Rule>>,
}

impl RuleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from drafts, in order; fails on the first invalid draft
    pub fn with_rules(drafts: impl IntoIterator<Item = RuleDraft>) -> RuleResult<Self> {
        let store = Self::new();
        for draft in drafts {
            store.create(draft)?;
        }
        Ok(store)
    }

    /// Create a store preloaded with the default detection rules
    pub fn seeded() -> RuleResult<Self> {
        Self::with_rules(crate::seed::default_rules())
    }

    // Every mutation swaps whole records, so a poisoned lock still guards
    // consistent data and can be recovered.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Rule>> {
        self.rules.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Rule>> {
        self.rules.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and store a new rule
    pub fn create(&self, draft: RuleDraft) -> RuleResult<Rule> {
        let rule = draft.into_rule(Utc::now())?;

        self.write().push(rule.clone());
        tracing::info!(rule_id = %rule.id, name = %rule.name, severity = %rule.severity, "Rule created");
        Ok(rule)
    }

    /// Replace the supplied fields of a rule and bump `modified_at`
    pub fn update(&self, id: &str, update: RuleUpdate) -> RuleResult<Rule> {
        let mut rules = self.write();
        let slot = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RuleError::NotFound(id.to_string()))?;

        let updated = update.apply(slot, Utc::now())?;
        *slot = updated.clone();

        tracing::info!(rule_id = %id, "Rule updated");
        Ok(updated)
    }

    /// Remove a rule; unknown ids are reported, not ignored
    pub fn delete(&self, id: &str) -> RuleResult<()> {
        let mut rules = self.write();
        let position = rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RuleError::NotFound(id.to_string()))?;

        let removed = rules.remove(position);
        tracing::info!(rule_id = %id, name = %removed.name, "Rule deleted");
        Ok(())
    }

    /// Flip `enabled` and bump `modified_at`
    pub fn toggle_enabled(&self, id: &str) -> RuleResult<Rule> {
        let mut rules = self.write();
        let rule = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RuleError::NotFound(id.to_string()))?;

        rule.enabled = !rule.enabled;
        rule.touch(Utc::now());

        tracing::info!(rule_id = %id, enabled = rule.enabled, "Rule toggled");
        Ok(rule.clone())
    }

    /// Set `enabled` explicitly; always bumps `modified_at`
    pub fn set_enabled(&self, id: &str, enabled: bool) -> RuleResult<Rule> {
        self.update(id, RuleUpdate::new().enabled(enabled))
    }

    /// Get a rule by id
    pub fn get(&self, id: &str) -> RuleResult<Rule> {
        self.read()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RuleError::NotFound(id.to_string()))
    }

    /// All rules, in insertion order
    pub fn list(&self) -> Vec<Rule> {
        self.read().clone()
    }

    /// Enabled rules at one instant, in store order
    pub fn enabled_snapshot(&self) -> Vec<Rule> {
        self.read().iter().filter(|r| r.enabled).cloned().collect()
    }

    /// Rules whose name or description contains `term` (case-insensitive)
    /// and, if given, whose severity matches
    pub fn filter(&self, term: &str, severity: Option<Severity>) -> Vec<Rule> {
        self.query(&RuleQuery::new(term, severity))
    }

    pub fn query(&self, query: &RuleQuery) -> Vec<Rule> {
        self.read()
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect()
    }

    /// Dashboard statistics over the current rules
    pub fn summary(&self) -> RuleSummary {
        RuleSummary::from_rules(self.read().iter())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
