//! Heuristic fraud scoring for synthetic transactions.
//!
//! This is a fixed additive rule over the sampled features, not a trained
//! model. The thresholds and bonuses below reproduce the demo's statistical
//! behavior and must stay exact.

use crate::types::TransactionRecord;

/// Starting score for every transaction
pub const BASE_SCORE: f64 = 0.05;
/// Bonus for night-time hours (before 06:00 or after 22:00)
pub const NIGHT_BONUS: f64 = 0.30;
/// Additional bonus for 02:00-04:59, stacking with the night bonus
pub const LATE_NIGHT_BONUS: f64 = 0.40;
/// Bonus for amounts above [`HIGH_AMOUNT`]
pub const HIGH_AMOUNT_BONUS: f64 = 0.20;
/// Bonus for location risk above [`RISKY_LOCATION`]
pub const RISKY_LOCATION_BONUS: f64 = 0.30;

pub const HIGH_AMOUNT: f64 = 2000.0;
pub const RISKY_LOCATION: f64 = 0.7;
/// Half-width of the uniform jitter added to the base score
pub const JITTER: f64 = 0.1;
/// Upper clamp of the final probability
pub const MAX_PROBABILITY: f64 = 0.95;
/// Probabilities strictly above this are flagged as fraud
pub const FRAUD_THRESHOLD: f64 = 0.5;

/// Sampled inputs of the scoring rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionFeatures {
    pub hour_of_day: u32,
    pub amount: f64,
    pub location_risk: f64,
}

impl TransactionFeatures {
    /// Features as stored on a sampled record
    pub fn of_record(record: &TransactionRecord) -> Self {
        Self {
            hour_of_day: record.hour_of_day,
            amount: record.amount,
            location_risk: record.location_risk_score,
        }
    }

    pub fn is_night(&self) -> bool {
        is_night_hour(self.hour_of_day)
    }

    pub fn is_late_night(&self) -> bool {
        matches!(self.hour_of_day, 2..=4)
    }
}

pub fn is_night_hour(hour: u32) -> bool {
    hour < 6 || hour > 22
}

/// Additive fraud heuristic.
pub struct FraudHeuristic;

impl FraudHeuristic {
    pub fn new() -> Self {
        Self
    }

    /// Score before jitter and clamping.
    pub fn base_score(&self, features: &TransactionFeatures) -> f64 {
        let mut score = BASE_SCORE;
        if features.is_night() {
            score += NIGHT_BONUS;
        }
        if features.is_late_night() {
            score += LATE_NIGHT_BONUS;
        }
        if features.amount > HIGH_AMOUNT {
            score += HIGH_AMOUNT_BONUS;
        }
        if features.location_risk > RISKY_LOCATION {
            score += RISKY_LOCATION_BONUS;
        }
        score
    }

    /// Final probability for the given jitter, clamped to [0, MAX_PROBABILITY].
    pub fn score(&self, features: &TransactionFeatures, jitter: f64) -> f64 {
        (self.base_score(features) + jitter).clamp(0.0, MAX_PROBABILITY)
    }

    /// Names of the rules that added to the base score, in evaluation order.
    pub fn triggered_rules(&self, features: &TransactionFeatures) -> Vec<&'static str> {
        let mut rules = Vec::new();
        if features.is_night() {
            rules.push("night_hour");
        }
        if features.is_late_night() {
            rules.push("late_night_hour");
        }
        if features.amount > HIGH_AMOUNT {
            rules.push("high_amount");
        }
        if features.location_risk > RISKY_LOCATION {
            rules.push("risky_location");
        }
        rules
    }

    pub fn is_fraud(probability: f64) -> bool {
        probability > FRAUD_THRESHOLD
    }
}

impl Default for FraudHeuristic {
    fn default() -> Self {
        Self::new()
    }
}
