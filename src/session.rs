//! Per-session record logs and the statistics shown beside them.
//!
//! A [`Session`] is owned by whoever drives the dashboard and handed to the
//! report renderers by reference. Nothing here outlives the process.

use crate::types::{ChatReply, Feedback, ServiceInteractionRecord, TransactionRecord};
use std::collections::VecDeque;

/// Number of buckets in the fraud probability histogram
pub const PROBABILITY_BUCKETS: usize = 20;

/// Ordered, append-only log of generated records.
///
/// Unbounded unless a capacity is given, in which case the oldest record is
/// dropped to make room.
#[derive(Debug, Clone)]
pub struct SessionLog<T> {
    records: VecDeque<T>,
    capacity: Option<usize>,
}

impl<T> SessionLog<T> {
    pub fn unbounded() -> Self {
        Self {
            records: VecDeque::new(),
            capacity: None,
        }
    }

    /// Log keeping at most `capacity` records (at least one)
    pub fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    pub fn push(&mut self, record: T) {
        if let Some(capacity) = self.capacity {
            while self.records.len() >= capacity {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn last(&self) -> Option<&T> {
        self.records.back()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.records.iter()
    }

    /// The newest `n` records, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &T> {
        self.records.iter().skip(self.records.len().saturating_sub(n))
    }
}

impl<T> Default for SessionLog<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Thumbs up/down counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackTally {
    pub up: u64,
    pub down: u64,
}

impl FeedbackTally {
    pub fn record(&mut self, feedback: Feedback) {
        match feedback {
            Feedback::Up => self.up += 1,
            Feedback::Down => self.down += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.up + self.down
    }

    /// Share of helpful votes, if any were cast
    pub fn helpful_rate(&self) -> Option<f64> {
        (self.total() > 0).then(|| self.up as f64 / self.total() as f64)
    }
}

/// Everything the interactive session accumulates
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub fraud_predictions: SessionLog<TransactionRecord>,
    pub interactions: SessionLog<ServiceInteractionRecord>,
    pub feedback: FeedbackTally,
}

impl Session {
    pub fn new(max_records: Option<usize>) -> Self {
        Self {
            fraud_predictions: SessionLog::with_capacity(max_records),
            interactions: SessionLog::with_capacity(max_records),
            feedback: FeedbackTally::default(),
        }
    }

    pub fn fraud_stats(&self) -> Option<FraudStats> {
        FraudStats::from_log(&self.fraud_predictions)
    }

    pub fn service_stats(&self) -> Option<ServiceStats> {
        ServiceStats::from_log(&self.interactions)
    }

    /// Count a rating of the assistant's reply. Without a reply there is
    /// nothing to rate and the feedback is dropped; returns whether it counted.
    pub fn rate_reply(&mut self, reply: Option<&ChatReply>, feedback: Feedback) -> bool {
        if reply.is_none() {
            return false;
        }
        self.feedback.record(feedback);
        true
    }
}

/// Live fraud statistics over the session's predictions
#[derive(Debug, Clone, PartialEq)]
pub struct FraudStats {
    pub total: usize,
    pub fraud_count: usize,
    /// Percent
    pub fraud_rate: f64,
    pub avg_amount: f64,
    /// Counts of fraud probabilities in equal-width buckets over [0, 1]
    pub probability_histogram: [u64; PROBABILITY_BUCKETS],
}

impl FraudStats {
    /// `None` for an empty log
    pub fn from_log(log: &SessionLog<TransactionRecord>) -> Option<Self> {
        if log.is_empty() {
            return None;
        }

        let total = log.len();
        let mut fraud_count = 0;
        let mut amount_sum = 0.0;
        let mut probability_histogram = [0u64; PROBABILITY_BUCKETS];

        for tx in log.iter() {
            if tx.is_fraud {
                fraud_count += 1;
            }
            amount_sum += tx.amount;
            let bucket = ((tx.fraud_probability * PROBABILITY_BUCKETS as f64) as usize)
                .min(PROBABILITY_BUCKETS - 1);
            probability_histogram[bucket] += 1;
        }

        Some(Self {
            total,
            fraud_count,
            fraud_rate: fraud_count as f64 / total as f64 * 100.0,
            avg_amount: amount_sum / total as f64,
            probability_histogram,
        })
    }
}

/// Live assistant analytics over the session's interactions
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceStats {
    pub total: usize,
    pub avg_response_time: f64,
    pub avg_confidence: f64,
    /// Fraction in [0, 1]
    pub satisfaction_rate: f64,
}

impl ServiceStats {
    /// `None` for an empty log
    pub fn from_log(log: &SessionLog<ServiceInteractionRecord>) -> Option<Self> {
        if log.is_empty() {
            return None;
        }

        let total = log.len() as f64;
        let (response_sum, confidence_sum, satisfied) =
            log.iter().fold((0.0, 0.0, 0usize), |(r, c, s), i| {
                (
                    r + i.response_time,
                    c + i.confidence_score,
                    s + usize::from(i.user_satisfied),
                )
            });

        Some(Self {
            total: log.len(),
            avg_response_time: response_sum / total,
            avg_confidence: confidence_sum / total,
            satisfaction_rate: satisfied as f64 / total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samplers::{ServiceQuerySampler, TransactionSampler};
    use crate::types::{Category, Merchant};
    use chrono::Utc;

    fn transaction(amount: f64, fraud_probability: f64) -> TransactionRecord {
        TransactionRecord {
            transaction_id: "TXN_100000".to_string(),
            user_id: "USER_1000".to_string(),
            amount,
            merchant: Merchant::Amazon,
            category: Category::Retail,
            location_risk_score: 0.1,
            hour_of_day: 12,
            is_weekend: false,
            is_night: false,
            fraud_probability,
            is_fraud: fraud_probability > 0.5,
            processing_time_ms: 100.0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_unbounded_log_keeps_everything_in_order() {
        let mut log = SessionLog::unbounded();
        for i in 0..100 {
            log.push(i);
        }
        assert_eq!(log.len(), 100);
        assert_eq!(log.iter().copied().next(), Some(0));
        assert_eq!(log.last(), Some(&99));
        assert_eq!(log.capacity(), None);
    }

    #[test]
    fn test_bounded_log_evicts_oldest() {
        let mut log = SessionLog::bounded(3);
        for i in 1..=5 {
            log.push(i);
        }
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(SessionLog::<u8>::bounded(0).capacity(), Some(1));
    }

    #[test]
    fn test_recent() {
        let mut log = SessionLog::unbounded();
        for i in 0..10 {
            log.push(i);
        }
        assert_eq!(log.recent(3).copied().collect::<Vec<_>>(), vec![7, 8, 9]);
        assert_eq!(log.recent(50).count(), 10);
    }

    #[test]
    fn test_fraud_stats() {
        let mut session = Session::new(None);
        assert!(session.fraud_stats().is_none());

        session.fraud_predictions.push(transaction(100.0, 0.1));
        session.fraud_predictions.push(transaction(300.0, 0.8));
        session.fraud_predictions.push(transaction(200.0, 0.95));
        session.fraud_predictions.push(transaction(400.0, 0.5));

        let stats = session.fraud_stats().unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.fraud_count, 2);
        assert!((stats.fraud_rate - 50.0).abs() < 1e-9);
        assert!((stats.avg_amount - 250.0).abs() < 1e-9);
        assert_eq!(stats.probability_histogram[2], 1);
        assert_eq!(stats.probability_histogram[10], 1);
        assert_eq!(stats.probability_histogram[16], 1);
        assert_eq!(stats.probability_histogram[19], 1);
        assert_eq!(stats.probability_histogram.iter().sum::<u64>(), 4);
    }

    #[test]
    fn test_fraud_stats_from_sampled_session() {
        let mut sampler = TransactionSampler::seeded(31);
        let mut session = Session::new(Some(50));
        for _ in 0..80 {
            session.fraud_predictions.push(sampler.sample());
        }

        let stats = session.fraud_stats().unwrap();
        assert_eq!(stats.total, 50);
        let flagged = session.fraud_predictions.iter().filter(|t| t.is_fraud).count();
        assert_eq!(stats.fraud_count, flagged);
        assert!((10.0..=5000.0).contains(&stats.avg_amount));
    }

    #[test]
    fn test_service_stats() {
        let mut sampler = ServiceQuerySampler::seeded(32);
        let mut session = Session::new(None);
        assert!(session.service_stats().is_none());

        for _ in 0..20 {
            session.interactions.push(sampler.sample());
        }

        let stats = session.service_stats().unwrap();
        assert_eq!(stats.total, 20);
        assert!((0.5..=3.0).contains(&stats.avg_response_time));
        assert!((0.7..=0.98).contains(&stats.avg_confidence));
        let satisfied = session.interactions.iter().filter(|i| i.user_satisfied).count();
        assert!((stats.satisfaction_rate - satisfied as f64 / 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_feedback_tally() {
        let mut tally = FeedbackTally::default();
        assert_eq!(tally.helpful_rate(), None);

        tally.record(Feedback::Up);
        tally.record(Feedback::Up);
        tally.record(Feedback::Up);
        tally.record(Feedback::Down);

        assert_eq!(tally.total(), 4);
        assert_eq!(tally.helpful_rate(), Some(0.75));
    }

    #[test]
    fn test_rating_requires_a_reply() {
        let mut session = Session::new(None);
        assert!(!session.rate_reply(None, Feedback::Up));
        assert_eq!(session.feedback.total(), 0);

        let reply = ServiceQuerySampler::seeded(26).reply("my order is late");
        assert!(session.rate_reply(Some(&reply), Feedback::Down));
        assert_eq!(session.feedback.total(), 1);
        assert_eq!(session.feedback.helpful_rate(), Some(0.0));
    }
}
