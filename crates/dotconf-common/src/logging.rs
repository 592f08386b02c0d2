//! Structured logging infrastructure for dotconf

use crate::error::{DotConfError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output style of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human oriented output
    Pretty,
    /// Single-line output
    #[default]
    Compact,
    /// Newline-delimited JSON records
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for LogFormat {
    type Err = DotConfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(DotConfError::settings(format!(
                "unknown log format '{other}' (expected pretty, compact or json)"
            ))),
        }
    }
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "`dotconf_store=trace`")
    pub level: String,
    /// Output style
    pub format: LogFormat,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Build the filter for this configuration.
    ///
    /// `RUST_LOG` wins over the configured level when it is set.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| {
            DotConfError::settings_with_source(format!("invalid log level '{}'", self.level), e)
        })
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(
                tfmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(config.include_targets),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tfmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(config.include_targets),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tfmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(config.include_targets),
            )
            .try_init(),
    };

    installed.map_err(|e| DotConfError::settings_with_source("failed to install logger", e))
}
