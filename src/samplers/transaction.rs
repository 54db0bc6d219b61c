//! Synthetic transaction sampler

use super::round_to;
use crate::scoring::{FraudHeuristic, TransactionFeatures, JITTER};
use crate::types::{Category, Merchant, TransactionRecord};
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces one synthetic transaction per call, scored by [`FraudHeuristic`].
pub struct TransactionSampler<R = StdRng> {
    rng: R,
    heuristic: FraudHeuristic,
}

impl TransactionSampler<StdRng> {
    /// Sampler seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Sampler with a reproducible stream
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TransactionSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            heuristic: FraudHeuristic::new(),
        }
    }

    /// Draw the features, score them, then fill in the descriptive fields.
    ///
    /// Features are rounded to their stored precision before scoring, so the
    /// record alone reproduces which rules fired.
    pub fn sample(&mut self) -> TransactionRecord {
        let hour_of_day = self.rng.gen_range(0..=23u32);
        let is_weekend = self.rng.gen_bool(0.5);
        let amount = round_to(self.rng.gen_range(10.0..=5000.0), 2);
        let location_risk = round_to(self.rng.gen_range(0.0..=1.0), 2);
        let jitter = self.rng.gen_range(-JITTER..=JITTER);

        let features = TransactionFeatures {
            hour_of_day,
            amount,
            location_risk,
        };
        // The flag is derived from the stored value so the record stays self-consistent
        let fraud_probability = round_to(self.heuristic.score(&features, jitter), 4);

        TransactionRecord {
            transaction_id: format!("TXN_{}", self.rng.gen_range(100_000..=999_999u32)),
            user_id: format!("USER_{}", self.rng.gen_range(1000..=9999u32)),
            amount,
            merchant: Merchant::ALL[self.rng.gen_range(0..Merchant::ALL.len())],
            category: Category::ALL[self.rng.gen_range(0..Category::ALL.len())],
            location_risk_score: location_risk,
            hour_of_day,
            is_weekend,
            is_night: features.is_night(),
            fraud_probability,
            is_fraud: FraudHeuristic::is_fraud(fraud_probability),
            processing_time_ms: round_to(self.rng.gen_range(50.0..=200.0), 2),
            timestamp: Utc::now() - Duration::seconds(self.rng.gen_range(0..=3600)),
        }
    }

    /// Rules that fired for an already sampled record
    pub fn triggered_rules(&self, record: &TransactionRecord) -> Vec<&'static str> {
        self.heuristic.triggered_rules(&TransactionFeatures::of_record(record))
    }
}
