//! Synthetic data samplers.
//!
//! Each sampler owns its random source and nothing else: successive calls
//! are independent draws, and two samplers seeded alike produce the same
//! stream.

pub mod metrics;
pub mod service;
pub mod transaction;

pub use metrics::MetricsSampler;
pub use service::{PendingReply, ServiceQuerySampler};
pub use transaction::TransactionSampler;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed offsets so samplers built from one configured seed draw distinct streams.
pub const TRANSACTION_STREAM: u64 = 0;
pub const SERVICE_STREAM: u64 = 1;
pub const METRICS_STREAM: u64 = 2;

/// Build a random source from an optional seed, falling back to OS entropy.
pub fn rng_from_seed(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_entropy(),
    }
}

/// Round to a fixed number of decimal places for display-stable values.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
