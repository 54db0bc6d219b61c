//! Customer service assistant interactions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Model version reported by the customer service assistant
pub const SERVICE_MODEL_VERSION: &str = "customer-service-v2.1";

/// A canned query/response exchange with its serving metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInteractionRecord {
    pub query: String,

    /// Response paired with `query` in the canned table
    pub response: String,

    /// Response time in seconds, within [0.5, 3.0]
    pub response_time: f64,

    /// Within [0.7, 0.98]
    pub confidence_score: f64,

    pub model_version: String,

    /// Backdated by up to 30 minutes
    pub timestamp: DateTime<Utc>,

    pub user_satisfied: bool,
}

/// Reply to a free-text question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    /// Seconds, within [0.8, 2.5]
    pub response_time: f64,
    /// Within [0.85, 0.98]
    pub confidence: f64,
}

/// Thumbs up/down answer to "was this response helpful?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Up,
    Down,
}
