//! System health and model quality snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall system status derived from resource usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemStatus {
    Healthy,
    Warning,
    Critical,
}

impl SystemStatus {
    /// Classify CPU and memory usage percentages.
    ///
    /// Critical above 80% CPU or 85% memory, Warning above 60% CPU or 70% memory.
    pub fn from_usage(cpu_usage: f64, memory_usage: f64) -> Self {
        if cpu_usage > 80.0 || memory_usage > 85.0 {
            SystemStatus::Critical
        } else if cpu_usage > 60.0 || memory_usage > 70.0 {
            SystemStatus::Warning
        } else {
            SystemStatus::Healthy
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SystemStatus::Healthy => "🟢",
            SystemStatus::Warning => "🟡",
            SystemStatus::Critical => "🔴",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemStatus::Healthy => write!(f, "Healthy"),
            SystemStatus::Warning => write!(f, "Warning"),
            SystemStatus::Critical => write!(f, "Critical"),
        }
    }
}

/// Point-in-time system health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub status: SystemStatus,
    /// Percent, within [20, 85]
    pub cpu_usage: f64,
    /// Percent, within [40, 90]
    pub memory_usage: f64,
    /// Percent, within [10, 70]
    pub disk_usage: f64,
    pub uptime_hours: f64,
    pub requests_per_minute: u32,
    /// Percent, within [0.1, 2.5]
    pub error_rate: f64,
}

/// Fraud model quality block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub auc_score: f64,
    pub data_drift_score: f64,
    pub model_version: String,
    pub last_retrained: DateTime<Utc>,
}

/// Customer service model quality block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceModelMetrics {
    pub satisfaction_rate: f64,
    /// Seconds
    pub avg_response_time: f64,
    pub resolution_rate: f64,
    pub model_confidence: f64,
    pub model_version: String,
    pub last_updated: DateTime<Utc>,
}

/// Both model blocks, drawn independently of each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub fraud_detection: FraudModelMetrics,
    pub customer_service: ServiceModelMetrics,
}

/// Displayed change indicators, independent of the snapshot they decorate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDeltas {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub error_rate: f64,
}

/// One hourly point of the 24h trend charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub time: DateTime<Utc>,
    pub cpu_usage: f64,
    pub requests_per_minute: u32,
}

/// Hourly CPU and request-rate history for the last 24 hours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
}

/// Min/mean/max summary of one series
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeriesSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl SeriesSummary {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            min,
            mean: sum / count as f64,
            max,
        }
    }
}

impl TrendSeries {
    pub fn cpu_summary(&self) -> SeriesSummary {
        SeriesSummary::of(self.points.iter().map(|p| p.cpu_usage))
    }

    pub fn request_summary(&self) -> SeriesSummary {
        SeriesSummary::of(self.points.iter().map(|p| p.requests_per_minute as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(SystemStatus::from_usage(80.1, 40.0), SystemStatus::Critical);
        assert_eq!(SystemStatus::from_usage(30.0, 85.1), SystemStatus::Critical);
        assert_eq!(SystemStatus::from_usage(80.0, 85.0), SystemStatus::Warning);
        assert_eq!(SystemStatus::from_usage(60.1, 40.0), SystemStatus::Warning);
        assert_eq!(SystemStatus::from_usage(30.0, 70.1), SystemStatus::Warning);
        assert_eq!(SystemStatus::from_usage(60.0, 70.0), SystemStatus::Healthy);
    }

    #[test]
    fn test_series_summary() {
        let now = Utc::now();
        let series = TrendSeries {
            points: vec![
                TrendPoint {
                    time: now,
                    cpu_usage: 30.0,
                    requests_per_minute: 400,
                },
                TrendPoint {
                    time: now,
                    cpu_usage: 60.0,
                    requests_per_minute: 800,
                },
            ],
        };

        let cpu = series.cpu_summary();
        assert_eq!(cpu.min, 30.0);
        assert_eq!(cpu.max, 60.0);
        assert!((cpu.mean - 45.0).abs() < 1e-9);
        assert_eq!(series.request_summary().mean, 600.0);

        let empty = TrendSeries { points: Vec::new() };
        assert_eq!(empty.cpu_summary(), SeriesSummary::default());
    }
}
