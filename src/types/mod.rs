//! Record types produced by the samplers

pub mod alert;
pub mod interaction;
pub mod snapshot;
pub mod transaction;

pub use alert::{Alert, AlertLevel, RiskLevel, RiskLevelThresholds};
pub use interaction::{ChatReply, Feedback, ServiceInteractionRecord, SERVICE_MODEL_VERSION};
pub use snapshot::{
    FraudModelMetrics, MetricDeltas, ModelSnapshot, ServiceModelMetrics, SystemSnapshot,
    SystemStatus, TrendPoint, TrendSeries,
};
pub use transaction::{Category, Merchant, TransactionRecord};
