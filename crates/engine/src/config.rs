//! Engine configuration
//!
//! Scoring policy is data, not code: severity weights, the flag policy and
//! the risk band edges can all be overridden from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::scoring::{FlagPolicy, RiskBands, SeverityWeights, MAX_RISK_SCORE};

/// Configuration for the [`crate::engine::RiskEngine`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Score contribution per severity
    #[serde(default)]
    pub severity_weights: SeverityWeights,

    /// When a result is reported as flagged
    #[serde(default)]
    pub flag_policy: FlagPolicy,

    /// Risk level band edges
    #[serde(default)]
    pub risk_bands: RiskBands,
}

impl EngineConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check weights and band edges
    ///
    /// Every weight must be in `1..=100` so that a match always moves the
    /// score; band edges must be strictly increasing and within the score range.
    pub fn validate(&self) -> ConfigResult<()> {
        let weights = &self.severity_weights;
        for (name, weight) in [
            ("low", weights.low),
            ("medium", weights.medium),
            ("high", weights.high),
            ("critical", weights.critical),
        ] {
            if weight == 0 || weight > MAX_RISK_SCORE {
                return Err(ConfigError::Invalid(format!(
                    "severity weight for {} must be between 1 and {}, got {}",
                    name, MAX_RISK_SCORE, weight
                )));
            }
        }

        let bands = &self.risk_bands;
        if bands.medium_from >= bands.high_from || bands.high_from > MAX_RISK_SCORE {
            return Err(ConfigError::Invalid(format!(
                "risk bands must satisfy medium_from < high_from <= {}, got {} / {}",
                MAX_RISK_SCORE, bands.medium_from, bands.high_from
            )));
        }

        if let FlagPolicy::MinScore { score } = self.flag_policy {
            if score > MAX_RISK_SCORE {
                return Err(ConfigError::Invalid(format!(
                    "flag threshold {} exceeds maximum score {}",
                    score, MAX_RISK_SCORE
                )));
            }
        }

        Ok(())
    }
}
