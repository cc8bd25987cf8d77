use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Output format selector (`json`, `pretty` or `compact`).
pub const LOG_FORMAT_ENV: &str = "TOOFF_LOG_FORMAT";
/// Default filter directives, used when `RUST_LOG` is unset.
pub const LOG_FILTER_ENV: &str = "TOOFF_LOG_FILTER";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObservabilityConfigError {
    #[error("invalid value for TOOFF_LOG_FORMAT: '{0}' (expected json, pretty or compact)")]
    InvalidFormat(String),

    #[error("invalid value for TOOFF_LOG_FILTER: {0}")]
    InvalidFilter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = ObservabilityConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(ObservabilityConfigError::InvalidFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives; `RUST_LOG` overrides them at startup.
    pub default_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            default_filter: "info".to_string(),
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Result<Self, ObservabilityConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ObservabilityConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOG_FORMAT_ENV).filter(|v| !v.trim().is_empty()) {
            config.format = raw.parse()?;
        }
        if let Some(raw) = lookup(LOG_FILTER_ENV).filter(|v| !v.trim().is_empty()) {
            let directives = raw.trim().to_string();
            EnvFilter::try_new(&directives)
                .map_err(|e| ObservabilityConfigError::InvalidFilter(e.to_string()))?;
            config.default_filter = directives;
        }

        Ok(config)
    }
}
