//! FraudGuard Store - rule management and the fraud detector service
//!
//! ```text
//! RuleStore ──(enabled snapshot)──► RiskEngine ──► EvaluationResult
//!     ▲
//!     └── create / update / delete / toggle / filter / summary
//! ```

pub mod detector;
pub mod query;
pub mod seed;
pub mod store;

pub use detector::FraudDetector;
pub use query::{RuleQuery, RuleSummary};
pub use seed::default_rules;
pub use store::RuleStore;
