//! Scoring policy: severity weights, flagging and risk bands
//!
//! Severity alone decides a matched rule's weight; the number of parameters
//! in the rule does not. Contributions sum and saturate at [`MAX_RISK_SCORE`].

use serde::{Deserialize, Serialize};

use fraudguard_core::Severity;

/// Upper bound of the aggregate risk score
pub const MAX_RISK_SCORE: u8 = 100;

/// Severity → score contribution table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityWeights {
    #[serde(default = "default_low")]
    pub low: u8,
    #[serde(default = "default_medium")]
    pub medium: u8,
    #[serde(default = "default_high")]
    pub high: u8,
    #[serde(default = "default_critical")]
    pub critical: u8,
}

fn default_low() -> u8 {
    20
}

fn default_medium() -> u8 {
    40
}

fn default_high() -> u8 {
    70
}

fn default_critical() -> u8 {
    90
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
            critical: default_critical(),
        }
    }
}

impl SeverityWeights {
    /// Contribution of a matched rule with this severity
    pub fn weight(&self, severity: Severity) -> u8 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }

    /// Sum contributions, saturating at [`MAX_RISK_SCORE`]
    pub fn aggregate(contributions: impl IntoIterator<Item = u8>) -> u8 {
        let total: u32 = contributions.into_iter().map(u32::from).sum();
        total.min(u32::from(MAX_RISK_SCORE)) as u8
    }
}

/// When an evaluation is reported as flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlagPolicy {
    /// Any matched rule flags the transaction (DEFAULT)
    #[default]
    AnyMatch,

    /// Flag only when the aggregate score reaches `score`
    MinScore { score: u8 },
}

impl FlagPolicy {
    pub fn is_flagged(&self, risk_score: u8, matched_rules: usize) -> bool {
        match self {
            FlagPolicy::AnyMatch => matched_rules > 0,
            FlagPolicy::MinScore { score } => matched_rules > 0 && risk_score >= *score,
        }
    }
}

/// Presentation band of a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk - Transaction likely legitimate",
            RiskLevel::Medium => "Medium Risk - Some anomalies detected",
            RiskLevel::High => "High Risk - Suspicious transaction",
        }
    }
}

/// Band edges: `score < medium_from` is low, `score < high_from` is medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBands {
    #[serde(default = "default_medium_from")]
    pub medium_from: u8,
    #[serde(default = "default_high_from")]
    pub high_from: u8,
}

fn default_medium_from() -> u8 {
    30
}

fn default_high_from() -> u8 {
    70
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            medium_from: default_medium_from(),
            high_from: default_high_from(),
        }
    }
}

impl RiskBands {
    pub fn classify(&self, risk_score: u8) -> RiskLevel {
        if risk_score < self.medium_from {
            RiskLevel::Low
        } else if risk_score < self.high_from {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = SeverityWeights::default();
        assert_eq!(weights.weight(Severity::Low), 20);
        assert_eq!(weights.weight(Severity::Medium), 40);
        assert_eq!(weights.weight(Severity::High), 70);
        assert_eq!(weights.weight(Severity::Critical), 90);
    }

    #[test]
    fn test_aggregate_saturates() {
        assert_eq!(SeverityWeights::aggregate([]), 0);
        assert_eq!(SeverityWeights::aggregate([90]), 90);
        assert_eq!(SeverityWeights::aggregate([70, 70]), 100);
        assert_eq!(SeverityWeights::aggregate([100, 100, 100, 100]), 100);
    }

    #[test]
    fn test_flag_policy() {
        assert!(!FlagPolicy::AnyMatch.is_flagged(0, 0));
        assert!(FlagPolicy::AnyMatch.is_flagged(20, 1));

        let banded = FlagPolicy::MinScore { score: 30 };
        assert!(!banded.is_flagged(20, 1));
        assert!(banded.is_flagged(30, 1));
        assert!(!FlagPolicy::MinScore { score: 0 }.is_flagged(0, 0));
    }

    #[test]
    fn test_flag_policy_json() {
        let policy: FlagPolicy = serde_json::from_str(r#"{ "type": "min_score", "score": 70 }"#).unwrap();
        assert_eq!(policy, FlagPolicy::MinScore { score: 70 });

        let json = serde_json::to_string(&FlagPolicy::AnyMatch).unwrap();
        assert!(json.contains("any_match"));
    }

    #[test]
    fn test_risk_bands() {
        let bands = RiskBands::default();
        assert_eq!(bands.classify(0), RiskLevel::Low);
        assert_eq!(bands.classify(29), RiskLevel::Low);
        assert_eq!(bands.classify(30), RiskLevel::Medium);
        assert_eq!(bands.classify(69), RiskLevel::Medium);
        assert_eq!(bands.classify(70), RiskLevel::High);
        assert_eq!(bands.classify(100), RiskLevel::High);
    }
}
