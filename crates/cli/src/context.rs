//! Application context - loads rules and engine configuration

use std::path::Path;

use anyhow::Context;

use fraudguard_core::{Rule, RuleDraft, RuleError};
use fraudguard_engine::{EngineConfig, RiskEngine};
use fraudguard_store::{FraudDetector, RuleStore};

/// Application context - one detector per invocation
pub struct AppContext {
    pub detector: FraudDetector,
}

impl AppContext {
    /// Build the detector from optional rule and config files.
    ///
    /// Without a rules file the default rules are loaded.
    pub fn new(rules_path: Option<&Path>, config_path: Option<&Path>) -> anyhow::Result<Self> {
        let store = match rules_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading rules from {}", path.display()))?;
                let drafts: Vec<RuleDraft> = serde_json::from_str(&content)
                    .with_context(|| format!("parsing rules in {}", path.display()))?;
                RuleStore::with_rules(drafts)
                    .with_context(|| format!("invalid rule in {}", path.display()))?
            }
            None => RuleStore::seeded().context("loading default rules")?,
        };

        let config = match config_path {
            Some(path) => EngineConfig::from_file(path)
                .with_context(|| format!("loading engine config from {}", path.display()))?,
            None => EngineConfig::default(),
        };

        tracing::debug!(rules = store.len(), ?config, "Context loaded");

        Ok(Self {
            detector: FraudDetector::new(store, RiskEngine::new(config)),
        })
    }

    /// Find a rule by id, falling back to a case-insensitive name match.
    ///
    /// Rule ids are generated at load time, so names are the stable handle
    /// from the command line.
    pub fn find_rule(&self, key: &str) -> Result<Rule, RuleError> {
        let store = self.detector.store();
        store.get(key).or_else(|err| {
            store
                .list()
                .into_iter()
                .find(|r| r.name.eq_ignore_ascii_case(key))
                .ok_or(err)
        })
    }
}
