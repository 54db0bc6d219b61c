//! Plain-text rendering of the four dashboard views.
//!
//! Renderers only read their inputs; the session is passed in by reference
//! and never modified here.

use crate::monitoring::{
    active_alerts, activity_log, recent_alerts, DriftStatus, SatisfactionStatus,
};
use crate::session::{Session, PROBABILITY_BUCKETS};
use crate::types::{
    ChatReply, FraudModelMetrics, MetricDeltas, ModelSnapshot, RiskLevel, RiskLevelThresholds,
    ServiceInteractionRecord, SystemSnapshot, TransactionRecord, TrendSeries,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::info;

const RULE: &str = "══════════════════════════════════════════════════════════════";

/// Dashboard views selectable from the navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    FraudDetection,
    CustomerService,
    Monitoring,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Overview => write!(f, "Dashboard Overview"),
            View::FraudDetection => write!(f, "Fraud Detection System"),
            View::CustomerService => write!(f, "Customer Service AI"),
            View::Monitoring => write!(f, "System Monitoring"),
        }
    }
}

/// A rendered view
#[derive(Debug, Clone)]
pub struct Report {
    pub view: View,
    pub lines: Vec<String>,
}

impl Report {
    fn new(view: View) -> Self {
        Self {
            view,
            lines: Vec::new(),
        }
    }

    fn heading(&mut self, text: &str) {
        self.lines.push(RULE.to_string());
        self.lines.push(text.to_string());
        self.lines.push(RULE.to_string());
    }

    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Emit every line through the logging layer
    pub fn log(&self) {
        info!(view = %self.view, lines = self.lines.len(), "Rendering view");
        for line in &self.lines {
            info!("{}", line);
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Executive dashboard
pub fn overview(system: &SystemSnapshot, models: &ModelSnapshot) -> Report {
    let mut report = Report::new(View::Overview);
    report.heading("📊 Executive Dashboard");

    report.line(format!(
        "System Status: {} {}  │  Requests/Min: {}  │  Error Rate: {}%  │  Uptime: {:.1}h",
        system.status.icon(),
        system.status,
        system.requests_per_minute,
        system.error_rate,
        system.uptime_hours
    ));

    report.heading("🎯 Model Performance Summary");
    let fraud = &models.fraud_detection;
    report.line("Fraud Detection Model");
    report.line(format!("  Accuracy:   {:.1}%", fraud.accuracy * 100.0));
    report.line(format!("  AUC Score:  {:.3}", fraud.auc_score));
    report.line(format!("  Data Drift: {:.3}", fraud.data_drift_score));
    report.line(format!("  {}", DriftStatus::from_score(fraud.data_drift_score)));

    let service = &models.customer_service;
    report.line("Customer Service AI");
    report.line(format!("  Satisfaction Rate: {:.1}%", service.satisfaction_rate * 100.0));
    report.line(format!("  Avg Response Time: {:.1}s", service.avg_response_time));
    report.line(format!("  Resolution Rate:   {:.1}%", service.resolution_rate * 100.0));
    report.line(format!("  {}", SatisfactionStatus::from_rate(service.satisfaction_rate)));

    report.heading("🚨 Recent Alerts");
    for alert in recent_alerts() {
        report.line(alert.to_string());
    }

    report
}

/// Fraud detection view: the latest prediction, live statistics, model metrics
pub fn fraud_detection(
    latest: Option<&TransactionRecord>,
    triggered_rules: &[&str],
    session: &Session,
    model: &FraudModelMetrics,
) -> Result<Report> {
    let mut report = Report::new(View::FraudDetection);
    report.heading("🛡️ Real-Time Fraud Detection System");

    if let Some(tx) = latest {
        let json = serde_json::to_string_pretty(tx).context("Failed to render transaction")?;
        report.lines.extend(json.lines().map(str::to_string));

        let risk_level =
            RiskLevel::from_score(tx.fraud_probability, &RiskLevelThresholds::default());
        if tx.is_fraud {
            report.line(format!("🚨 FRAUD DETECTED - Risk Level: {}", risk_level));
        } else {
            report.line(format!("✅ LEGITIMATE - Risk Level: {}", risk_level));
        }
        report.line(format!("Fraud Probability: {:.1}%", tx.fraud_probability * 100.0));
        if !triggered_rules.is_empty() {
            report.line(format!("Triggered rules: {}", triggered_rules.join(", ")));
        }
        report.line(format!("⏱️ Processing Time: {}ms", tx.processing_time_ms));
    }

    report.heading("Live Fraud Statistics");
    match session.fraud_stats() {
        Some(stats) => {
            report.line(format!(
                "Total Transactions: {:>6}  │  Fraud Rate: {:>5.1}%",
                stats.total, stats.fraud_rate
            ));
            report.line(format!(
                "Fraud Detected:     {:>6}  │  Avg Amount: ${:.2}",
                stats.fraud_count, stats.avg_amount
            ));

            report.line("Fraud Probability Distribution:");
            for (i, &count) in stats.probability_histogram.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let pct = count as f64 / stats.total as f64 * 100.0;
                let bar = "█".repeat(((pct / 2.0) as usize).clamp(1, 20));
                report.line(format!(
                    "  {:.2}-{:.2}: {:>5} ({:>5.1}%) {}",
                    i as f64 / PROBABILITY_BUCKETS as f64,
                    (i + 1) as f64 / PROBABILITY_BUCKETS as f64,
                    count,
                    pct,
                    bar
                ));
            }

            report.line("Recent Transactions:");
            for tx in session.fraud_predictions.recent(5) {
                report.line(format!(
                    "  {}  ${:>8.2}  p={:.4}  fraud={}  {}ms",
                    tx.transaction_id,
                    tx.amount,
                    tx.fraud_probability,
                    tx.is_fraud,
                    tx.processing_time_ms
                ));
            }
        }
        None => report.line("Generate some transactions to see statistics"),
    }

    report.heading("📈 Model Performance Metrics");
    report.line(format!(
        "Accuracy: {:.1}%  │  Precision: {:.3}  │  Recall: {:.3}  │  F1-Score: {:.3}",
        model.accuracy * 100.0,
        model.precision,
        model.recall,
        model.f1_score
    ));

    Ok(report)
}

/// What the assistant produced in response to the last action
#[derive(Debug, Clone, Copy)]
pub enum AssistantOutput<'a> {
    Nothing,
    Sample(&'a ServiceInteractionRecord),
    Reply { query: &'a str, reply: &'a ChatReply },
}

/// Customer service view: the latest exchange and session analytics
pub fn customer_service(output: AssistantOutput<'_>, session: &Session) -> Report {
    let mut report = Report::new(View::CustomerService);
    report.heading("💬 Customer Service AI Assistant");

    match output {
        AssistantOutput::Nothing => {}
        AssistantOutput::Sample(interaction) => {
            report.line(format!("Customer Query: {}", interaction.query));
            report.line(format!("AI Response:    {}", interaction.response));
            report.line(format!(
                "Response Time: {}s  │  Confidence: {:.1}%",
                interaction.response_time,
                interaction.confidence_score * 100.0
            ));
            report.line(format!(
                "User Satisfied: {}  │  Model Version: {}",
                if interaction.user_satisfied { "😊" } else { "😞" },
                interaction.model_version
            ));
        }
        AssistantOutput::Reply { query, reply } => {
            report.line(format!("Customer Query: {}", query));
            report.line(format!("AI Response:    {}", reply.text));
            report.line(format!(
                "Response Time: {:.1}s  │  Confidence: {:.1}%",
                reply.response_time,
                reply.confidence * 100.0
            ));
            report.line("Was this response helpful? 👍 / 👎");
        }
    }

    report.heading("Performance Analytics");
    match session.service_stats() {
        Some(stats) => {
            report.line(format!(
                "Total Interactions: {:>5}  │  Satisfaction Rate: {:.1}%",
                stats.total,
                stats.satisfaction_rate * 100.0
            ));
            report.line(format!(
                "Avg Response Time: {:.1}s  │  Avg Confidence: {:.1}%",
                stats.avg_response_time,
                stats.avg_confidence * 100.0
            ));

            report.line("Response Time Trend:");
            let trend: Vec<String> = session
                .interactions
                .iter()
                .map(|i| format!("{:.2}", i.response_time))
                .collect();
            report.line(format!("  {}", trend.join(" → ")));

            report.line("Recent Interactions:");
            for interaction in session.interactions.recent(3) {
                report.line(format!(
                    "  {:<40} {:>5.2}s  {:.3}  satisfied={}",
                    interaction.query,
                    interaction.response_time,
                    interaction.confidence_score,
                    interaction.user_satisfied
                ));
            }
        }
        None => report.line("Generate some interactions to see analytics"),
    }

    let feedback = session.feedback;
    if let Some(rate) = feedback.helpful_rate() {
        report.line(format!(
            "Feedback: 👍 {}  👎 {}  ({:.0}% helpful)",
            feedback.up,
            feedback.down,
            rate * 100.0
        ));
    }

    report
}

/// System monitoring view
pub fn monitoring(
    system: &SystemSnapshot,
    deltas: &MetricDeltas,
    trends: &TrendSeries,
    models: &ModelSnapshot,
    now: DateTime<Utc>,
) -> Report {
    let mut report = Report::new(View::Monitoring);
    report.heading("🖥️ System Health");

    report.line(format!("CPU Usage:    {:>5}%  ({:+.1}%)", system.cpu_usage, deltas.cpu_usage));
    report.line(format!(
        "Memory Usage: {:>5}%  ({:+.1}%)",
        system.memory_usage, deltas.memory_usage
    ));
    report.line(format!("Disk Usage:   {:>5}%  ({:+.1}%)", system.disk_usage, deltas.disk_usage));
    report.line(format!("Error Rate:   {:>5}%  ({:+.2}%)", system.error_rate, deltas.error_rate));

    report.heading("📈 Performance Trends (24h)");
    let cpu = trends.cpu_summary();
    let requests = trends.request_summary();
    report.line(format!(
        "CPU Usage:    min {:.1}%  avg {:.1}%  max {:.1}%",
        cpu.min, cpu.mean, cpu.max
    ));
    report.line(format!(
        "Request Rate: min {:.0}  avg {:.0}  max {:.0} req/min",
        requests.min, requests.mean, requests.max
    ));

    report.heading("🎯 Model Drift Detection");
    let drift = models.fraud_detection.data_drift_score;
    report.line(format!(
        "Fraud Model Drift Score: {:.3} ({:+.3} vs 0.3 reference)",
        drift,
        drift - 0.3
    ));
    report.line(format!("  {}", DriftStatus::from_score(drift)));

    report.heading("🚨 Active Alerts");
    let alerts = active_alerts(system, models);
    if alerts.is_empty() {
        report.line("✅ No active alerts - All systems healthy");
    } else {
        for alert in alerts {
            report.line(alert.to_string());
        }
    }

    report.heading("📋 Recent Activity");
    for entry in activity_log(now, drift) {
        report.line(entry);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samplers::{MetricsSampler, ServiceQuerySampler, TransactionSampler};
    use crate::types::{Feedback, SystemStatus};

    #[test]
    fn test_overview_report() {
        let mut sampler = MetricsSampler::seeded(51);
        let system = sampler.system_snapshot();
        let models = sampler.model_snapshot();

        let report = overview(&system, &models);
        assert_eq!(report.view, View::Overview);
        let status_line = format!("System Status: {} {}", system.status.icon(), system.status);
        assert!(report.contains(&status_line));
        assert!(report.contains("Memory usage exceeded 90% threshold (RESOLVED)"));
        let drift = DriftStatus::from_score(models.fraud_detection.data_drift_score);
        assert!(report.contains(drift.message()));
    }

    #[test]
    fn test_fraud_report_without_transactions() {
        let session = Session::new(None);
        let model = MetricsSampler::seeded(52).model_snapshot().fraud_detection;

        let report = fraud_detection(None, &[], &session, &model).unwrap();
        assert!(report.contains("Generate some transactions to see statistics"));
        assert!(report.contains("Precision"));
    }

    #[test]
    fn test_fraud_report_with_transaction() {
        let mut sampler = TransactionSampler::seeded(53);
        let mut session = Session::new(None);
        let model = MetricsSampler::seeded(53).model_snapshot().fraud_detection;

        for _ in 0..10 {
            session.fraud_predictions.push(sampler.sample());
        }
        let latest = session.fraud_predictions.last().unwrap();
        let rules = sampler.triggered_rules(latest);

        let report = fraud_detection(Some(latest), &rules, &session, &model).unwrap();
        assert!(report.contains(&format!("\"transaction_id\": \"{}\"", latest.transaction_id)));
        if latest.is_fraud {
            assert!(report.contains("FRAUD DETECTED"));
        } else {
            assert!(report.contains("LEGITIMATE"));
        }
        assert!(report.contains("Total Transactions:     10"));
    }

    #[test]
    fn test_service_report_sample_and_feedback() {
        let mut sampler = ServiceQuerySampler::seeded(54);
        let mut session = Session::new(None);
        let interaction = sampler.sample();
        session.interactions.push(interaction.clone());
        session.feedback.record(Feedback::Up);

        let report = customer_service(AssistantOutput::Sample(&interaction), &session);
        assert!(report.contains(&interaction.query));
        assert!(report.contains(&interaction.response));
        assert!(report.contains("Total Interactions:     1"));
        assert!(report.contains("(100% helpful)"));
    }

    #[test]
    fn test_service_report_reply() {
        let mut sampler = ServiceQuerySampler::seeded(55);
        let session = Session::new(None);
        let reply = sampler.reply("banana");

        let report = customer_service(
            AssistantOutput::Reply {
                query: "banana",
                reply: &reply,
            },
            &session,
        );
        assert!(report.contains("I understand your concern"));
        assert!(report.contains("Generate some interactions to see analytics"));
    }

    #[test]
    fn test_monitoring_report_alerts() {
        let mut sampler = MetricsSampler::seeded(56);
        let mut models = sampler.model_snapshot();
        models.fraud_detection.data_drift_score = 0.2;
        let deltas = sampler.deltas();
        let trends = sampler.trends();

        let calm = SystemSnapshot {
            status: SystemStatus::Healthy,
            cpu_usage: 40.0,
            memory_usage: 50.0,
            disk_usage: 20.0,
            uptime_hours: 300.0,
            requests_per_minute: 700,
            error_rate: 0.5,
        };
        let report = monitoring(&calm, &deltas, &trends, &models, Utc::now());
        assert!(report.contains("No active alerts"));
        assert!(report.contains("Fraud model processed 1,247 transactions"));

        let hot = SystemSnapshot {
            cpu_usage: 84.2,
            status: SystemStatus::Critical,
            ..calm
        };
        let report = monitoring(&hot, &deltas, &trends, &models, Utc::now());
        assert!(report.contains("CRITICAL: CPU usage at 84.2%"));
    }

    #[test]
    fn test_view_names() {
        assert_eq!(View::Overview.to_string(), "Dashboard Overview");
        assert_eq!(View::Monitoring.to_string(), "System Monitoring");
    }
}
