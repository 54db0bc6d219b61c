//! Configuration management for the MLOps demo

use anyhow::{bail, Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sampling: SamplingConfig,
    pub session: SessionConfig,
    pub service: ServiceConfig,
    pub monitoring: MonitoringConfig,
    pub logging: LoggingConfig,
}

/// Random source configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Seed shared by all samplers; entropy is used when absent
    pub seed: Option<u64>,
}

/// Session log configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum records kept per log (None = unbounded)
    pub max_records: Option<usize>,
}

/// Customer service assistant configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Simulated "thinking" time before a free-text reply, in milliseconds
    pub thinking_delay_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 1000,
        }
    }
}

impl ServiceConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

/// System monitoring view configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Number of renders performed by the auto-refresh loop
    pub refresh_iterations: u32,
    /// Delay between auto-refresh renders, in seconds
    pub refresh_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            refresh_iterations: 12,
            refresh_interval_secs: 5,
        }
    }
}

impl MonitoringConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file is not an error: every section falls back to its defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.monitoring.refresh_interval_secs == 0 {
            bail!("monitoring.refresh_interval_secs must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.sampling.seed, None);
        assert_eq!(config.session.max_records, None);
        assert_eq!(config.service.thinking_delay(), Duration::from_secs(1));
        assert_eq!(config.monitoring.refresh_iterations, 12);
        assert_eq!(config.monitoring.refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_path("does/not/exist.toml").unwrap();
        assert_eq!(config.monitoring.refresh_iterations, 12);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let path = std::env::temp_dir().join(format!("mlops-demo-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[sampling]\nseed = 7\n\n[monitoring]\nrefresh_iterations = 3\n",
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.sampling.seed, Some(7));
        assert_eq!(config.monitoring.refresh_iterations, 3);
        assert_eq!(config.monitoring.refresh_interval_secs, 5);
        assert_eq!(config.service.thinking_delay_ms, 1000);
    }

    #[test]
    fn test_zero_refresh_interval_rejected() {
        let path = std::env::temp_dir().join(format!("mlops-demo-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[monitoring]\nrefresh_interval_secs = 0\n").unwrap();

        let result = AppConfig::load_from_path(&path);
        std::fs::remove_file(&path).ok();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("refresh_interval_secs"));
    }
}
