//! FraudGuard Evaluation Engine
//!
//! ```text
//! Rule (enabled?) ──► ParameterEvaluator × N ──► AND ──► RuleOutcome
//!                                                          │
//! all enabled rules ───────────────────────────────────────┘
//!        │
//!        ▼
//! sum(contributions).min(100) ──► EvaluationResult { riskScore, flagged, riskLevel }
//! ```
//!
//! ## Key Components
//!
//! - [`evaluator::ParameterEvaluator`] - One parameter against one transaction field
//! - [`evaluator::RuleEvaluator`] - Conjunction of parameters, severity-weighted
//! - [`engine::RiskEngine`] - Aggregation over a rule set
//! - [`scoring`] - Severity weight table, flag policy, risk bands
//! - [`config::EngineConfig`] - Scoring policy loaded from JSON

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod field;
pub mod scoring;

pub use config::EngineConfig;
pub use engine::{EvaluationResult, RiskEngine};
pub use error::{ConfigError, ConfigResult};
pub use evaluator::{ParameterEvaluator, RuleEvaluator, RuleOutcome};
pub use field::FieldValue;
pub use scoring::{FlagPolicy, RiskBands, RiskLevel, SeverityWeights, MAX_RISK_SCORE};
