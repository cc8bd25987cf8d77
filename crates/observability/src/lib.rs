//! Logging setup shared by every binary embedding the absence core.

pub mod config;
pub mod subscriber;

pub use config::{LOG_FILTER_ENV, LOG_FORMAT_ENV, LogFormat, ObservabilityConfig, ObservabilityConfigError};
pub use subscriber::init_with;

/// Initialize process-wide logging from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops. A broken
/// configuration falls back to the defaults and is reported once the
/// subscriber is up.
pub fn init() {
    match ObservabilityConfig::from_env() {
        Ok(config) => {
            init_with(&config);
        }
        Err(err) => {
            init_with(&ObservabilityConfig::default());
            tracing::warn!(error = %err, "invalid logging configuration; using defaults");
        }
    }
}
