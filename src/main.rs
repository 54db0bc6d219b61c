//! MLOps Demo - Main Entry Point
//!
//! Headless front end for the synthetic dashboard: pick a view, trigger the
//! same actions the interactive page offers, and read the rendered report
//! from the log.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use mlops_demo::{
    config::{AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH},
    monitoring::AutoRefresh,
    report::{self, AssistantOutput},
    samplers::{
        rng_from_seed, MetricsSampler, ServiceQuerySampler, TransactionSampler, METRICS_STREAM,
        SERVICE_STREAM, TRANSACTION_STREAM,
    },
    session::Session,
    types::Feedback,
};
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mlops-demo", version, about = "Synthetic MLOps platform dashboard")]
struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seed for reproducible output (overrides the configuration)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Executive dashboard
    Overview,
    /// Generate sample transactions and show live fraud statistics
    Fraud {
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Sample canned interactions or ask the assistant a question
    Service {
        /// Number of sample interactions to generate
        #[arg(long, default_value_t = 0)]
        count: usize,
        /// Free-text question for the assistant
        #[arg(long)]
        query: Option<String>,
        /// Rate the assistant's reply
        #[arg(long, value_enum)]
        feedback: Option<FeedbackArg>,
    },
    /// System monitoring and alerts
    Monitor {
        /// Re-render on a fixed interval instead of once
        #[arg(long)]
        auto_refresh: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FeedbackArg {
    Up,
    Down,
}

impl From<FeedbackArg> for Feedback {
    fn from(arg: FeedbackArg) -> Self {
        match arg {
            FeedbackArg::Up => Feedback::Up,
            FeedbackArg::Down => Feedback::Down,
        }
    }
}

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("mlops_demo={}", config.level))
            .context("Invalid log level in configuration")?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }

    Ok(())
}

struct Samplers {
    transactions: TransactionSampler<StdRng>,
    service: ServiceQuerySampler<StdRng>,
    metrics: MetricsSampler<StdRng>,
}

impl Samplers {
    fn new(seed: Option<u64>) -> Self {
        Self {
            transactions: TransactionSampler::with_rng(rng_from_seed(seed, TRANSACTION_STREAM)),
            service: ServiceQuerySampler::with_rng(rng_from_seed(seed, SERVICE_STREAM)),
            metrics: MetricsSampler::with_rng(rng_from_seed(seed, METRICS_STREAM)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from_path(&cli.config)?;
    if cli.seed.is_some() {
        config.sampling.seed = cli.seed;
    }

    init_logging(&config.logging)?;

    info!(
        config = %cli.config.display(),
        seed = ?config.sampling.seed,
        max_records = ?config.session.max_records,
        "Starting MLOps demo"
    );

    let mut samplers = Samplers::new(config.sampling.seed);
    let mut session = Session::new(config.session.max_records);

    match cli.command {
        Command::Overview => {
            let system = samplers.metrics.system_snapshot();
            let models = samplers.metrics.model_snapshot();
            report::overview(&system, &models).log();
        }

        Command::Fraud { count } => {
            for _ in 0..count {
                let tx = samplers.transactions.sample();
                debug!(
                    transaction_id = %tx.transaction_id,
                    fraud_probability = tx.fraud_probability,
                    is_fraud = tx.is_fraud,
                    "Generated sample transaction"
                );
                session.fraud_predictions.push(tx);
            }

            let latest = session.fraud_predictions.last();
            let rules = latest
                .map(|tx| samplers.transactions.triggered_rules(tx))
                .unwrap_or_default();
            let model = samplers.metrics.model_snapshot().fraud_detection;

            report::fraud_detection(latest, &rules, &session, &model)?.log();
        }

        Command::Service {
            count,
            query,
            feedback,
        } => {
            let samples = if count == 0 && query.is_none() { 1 } else { count };
            for _ in 0..samples {
                let interaction = samplers.service.sample();
                debug!(
                    query = %interaction.query,
                    confidence = interaction.confidence_score,
                    "Generated sample interaction"
                );
                session.interactions.push(interaction);
            }

            let reply = match &query {
                Some(text) => {
                    let mut pending = samplers
                        .service
                        .reply_after(text, config.service.thinking_delay());
                    info!("AI is thinking...");

                    tokio::select! {
                        reply = pending.wait() => reply,
                        _ = tokio::signal::ctrl_c() => {
                            pending.cancel();
                            warn!("Interrupted while waiting for the assistant");
                            None
                        }
                    }
                }
                None => None,
            };

            if let Some(feedback) = feedback {
                if !session.rate_reply(reply.as_ref(), feedback.into()) {
                    warn!("Ignoring feedback: there is no assistant reply to rate");
                }
            }

            let output = match (&query, &reply) {
                (Some(query), Some(reply)) => AssistantOutput::Reply { query, reply },
                _ => session
                    .interactions
                    .last()
                    .map(AssistantOutput::Sample)
                    .unwrap_or(AssistantOutput::Nothing),
            };
            report::customer_service(output, &session).log();
        }

        Command::Monitor { auto_refresh } => {
            let metrics = &mut samplers.metrics;
            let mut render = || {
                let system = metrics.system_snapshot();
                let deltas = metrics.deltas();
                let trends = metrics.trends();
                let models = metrics.model_snapshot();
                report::monitoring(&system, &deltas, &trends, &models, Utc::now()).log();
            };

            if auto_refresh {
                let refresh = AutoRefresh::new(
                    config.monitoring.refresh_iterations,
                    config.monitoring.refresh_interval(),
                );
                info!(
                    iterations = config.monitoring.refresh_iterations,
                    interval_secs = config.monitoring.refresh_interval_secs,
                    "Auto-refresh enabled"
                );

                let run = refresh.run(|iteration| {
                    debug!(iteration, "Refreshing monitoring view");
                    render();
                    std::future::ready(())
                });

                tokio::select! {
                    rendered = run => info!(rendered, "Auto-refresh finished"),
                    _ = tokio::signal::ctrl_c() => warn!("Auto-refresh interrupted"),
                }
            } else {
                render();
            }
        }
    }

    Ok(())
}
