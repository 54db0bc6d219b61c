//! System health and model quality sampler

use super::round_to;
use crate::types::{
    FraudModelMetrics, MetricDeltas, ModelSnapshot, ServiceModelMetrics, SystemSnapshot,
    SystemStatus, TrendPoint, TrendSeries, SERVICE_MODEL_VERSION,
};
use chrono::{Duration, DurationRound, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Model version reported by the fraud detector
pub const FRAUD_MODEL_VERSION: &str = "fraud-detector-v3.2";

/// Hours covered by the trend charts
pub const TREND_WINDOW_HOURS: i64 = 24;

/// Draws uncorrelated metric snapshots. No history or smoothing is kept.
pub struct MetricsSampler<R = StdRng> {
    rng: R,
}

impl MetricsSampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MetricsSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Current system health.
    ///
    /// Status is derived from the rounded usage values that the snapshot carries.
    pub fn system_snapshot(&mut self) -> SystemSnapshot {
        let cpu_usage = round_to(self.rng.gen_range(20.0..=85.0), 1);
        let memory_usage = round_to(self.rng.gen_range(40.0..=90.0), 1);
        let disk_usage = round_to(self.rng.gen_range(10.0..=70.0), 1);

        SystemSnapshot {
            status: SystemStatus::from_usage(cpu_usage, memory_usage),
            cpu_usage,
            memory_usage,
            disk_usage,
            uptime_hours: round_to(self.rng.gen_range(120.0..=720.0), 1),
            requests_per_minute: self.rng.gen_range(450..=1200),
            error_rate: round_to(self.rng.gen_range(0.1..=2.5), 2),
        }
    }

    /// Quality metrics for both models, every value an independent draw.
    pub fn model_snapshot(&mut self) -> ModelSnapshot {
        let now = Utc::now();

        let fraud_detection = FraudModelMetrics {
            accuracy: round_to(self.rng.gen_range(0.85..=0.96), 3),
            precision: round_to(self.rng.gen_range(0.82..=0.95), 3),
            recall: round_to(self.rng.gen_range(0.80..=0.93), 3),
            f1_score: round_to(self.rng.gen_range(0.81..=0.94), 3),
            auc_score: round_to(self.rng.gen_range(0.87..=0.97), 3),
            data_drift_score: round_to(self.rng.gen_range(0.1..=0.6), 3),
            model_version: FRAUD_MODEL_VERSION.to_string(),
            last_retrained: now - Duration::days(self.rng.gen_range(1..=7)),
        };

        let customer_service = ServiceModelMetrics {
            satisfaction_rate: round_to(self.rng.gen_range(0.78..=0.94), 3),
            avg_response_time: round_to(self.rng.gen_range(1.2..=2.8), 2),
            resolution_rate: round_to(self.rng.gen_range(0.85..=0.95), 3),
            model_confidence: round_to(self.rng.gen_range(0.88..=0.96), 3),
            model_version: SERVICE_MODEL_VERSION.to_string(),
            last_updated: now - Duration::days(self.rng.gen_range(1..=14)),
        };

        ModelSnapshot {
            fraud_detection,
            customer_service,
        }
    }

    /// Change indicators shown beside the usage figures.
    ///
    /// These are not computed from any previous snapshot.
    pub fn deltas(&mut self) -> MetricDeltas {
        MetricDeltas {
            cpu_usage: round_to(self.rng.gen_range(-5.0..=5.0), 1),
            memory_usage: round_to(self.rng.gen_range(-3.0..=7.0), 1),
            disk_usage: round_to(self.rng.gen_range(-1.0..=2.0), 1),
            error_rate: round_to(self.rng.gen_range(-0.5..=0.5), 2),
        }
    }

    /// Hourly points from 24 hours ago up to the current hour, inclusive.
    pub fn trends(&mut self) -> TrendSeries {
        let now = Utc::now();
        let end = now.duration_trunc(Duration::hours(1)).unwrap_or(now);

        let points = (0..=TREND_WINDOW_HOURS)
            .rev()
            .map(|hours_ago| TrendPoint {
                time: end - Duration::hours(hours_ago),
                cpu_usage: round_to(self.rng.gen_range(30.0..=85.0), 1),
                requests_per_minute: self.rng.gen_range(400..=1200),
            })
            .collect();

        TrendSeries { points }
    }
}
