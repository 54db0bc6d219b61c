//! Risk labels and dashboard alert data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level shown next to a fraud verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Determine risk level from a fraud probability and thresholds.
    ///
    /// Bounds are exclusive: a score equal to a threshold stays in the lower level.
    pub fn from_score(score: f64, thresholds: &RiskLevelThresholds) -> Self {
        if score > thresholds.high {
            RiskLevel::High
        } else if score > thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Risk level classification thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLevelThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for RiskLevelThresholds {
    fn default() -> Self {
        Self {
            medium: 0.3,
            high: 0.7,
        }
    }
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            AlertLevel::Info => "🔵",
            AlertLevel::Warning => "🟡",
            AlertLevel::Critical => "🔴",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Info => write!(f, "INFO"),
            AlertLevel::Warning => write!(f, "WARNING"),
            AlertLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Dashboard alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique alert identifier
    pub alert_id: String,

    pub level: AlertLevel,

    pub message: String,

    /// Human readable age, e.g. "2 hours ago"
    pub age: Option<String>,

    pub resolved: bool,

    /// Alert generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// Create a new, unresolved alert
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            alert_id: uuid::Uuid::new_v4().to_string(),
            level,
            message: message.into(),
            age: None,
            resolved: false,
            timestamp: Utc::now(),
        }
    }

    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn resolved(mut self) -> Self {
        self.resolved = true;
        self
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.level.icon(), self.level, self.message)?;
        if self.resolved {
            write!(f, " (RESOLVED)")?;
        }
        if let Some(age) = &self.age {
            write!(f, " [{}]", age)?;
        }
        Ok(())
    }
}
