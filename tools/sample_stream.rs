//! Sample Transaction Stream
//!
//! Emits synthetic transactions as JSON lines on stdout, for feeding other
//! tools or eyeballing the fraud heuristic's output.
//!
//! Usage: sample-stream [count] [seed] [delay_ms]

use anyhow::Context;
use mlops_demo::samplers::{rng_from_seed, TRANSACTION_STREAM};
use mlops_demo::session::{FraudStats, SessionLog};
use mlops_demo::TransactionSampler;
use std::io::Write;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pure JSON lines
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sample_stream=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let count: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100);
    let seed: Option<u64> = args.get(2).and_then(|s| s.parse().ok());
    let delay_ms: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0);

    info!(count, seed = ?seed, delay_ms, "Configuration loaded");

    let mut sampler = TransactionSampler::with_rng(rng_from_seed(seed, TRANSACTION_STREAM));
    let mut log = SessionLog::unbounded();
    let stdout = std::io::stdout();

    for i in 0..count {
        let transaction = sampler.sample();

        {
            let mut out = stdout.lock();
            serde_json::to_writer(&mut out, &transaction)?;
            writeln!(out).context("Failed to write transaction")?;
        }
        log.push(transaction);

        if (i + 1) % 10 == 0 {
            info!("Emitted {}/{} transactions", i + 1, count);
        }

        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    if let Some(stats) = FraudStats::from_log(&log) {
        info!(
            total = stats.total,
            fraud = stats.fraud_count,
            fraud_rate = format!("{:.1}%", stats.fraud_rate),
            avg_amount = format!("{:.2}", stats.avg_amount),
            "Completed"
        );
    }

    Ok(())
}
