//! MLOps Demo Library
//!
//! Synthetic telemetry for an MLOps dashboard: fraud predictions from a
//! heuristic score, a canned customer service assistant, and randomized
//! system health and model quality snapshots.

pub mod config;
pub mod monitoring;
pub mod report;
pub mod samplers;
pub mod scoring;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use samplers::{MetricsSampler, ServiceQuerySampler, TransactionSampler};
pub use scoring::FraudHeuristic;
pub use session::{Session, SessionLog};
pub use types::{ServiceInteractionRecord, TransactionRecord};
