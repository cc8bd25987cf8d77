//! Policy configuration.

use thiserror::Error;

/// Environment variable toggling self-approval.
pub const ALLOW_SELF_APPROVAL_ENV: &str = "TOOFF_ALLOW_SELF_APPROVAL";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' (expected true/false)")]
    InvalidBool { key: &'static str, value: String },
}

/// Tunables for [`AccessPolicy`](crate::AccessPolicy).
///
/// Defaults reproduce the behavior of the existing dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyOptions {
    /// Whether an approver may approve or reject an event they own.
    pub allow_self_approval: bool,
}

impl Default for PolicyOptions {
    fn default() -> Self {
        Self {
            allow_self_approval: true,
        }
    }
}

impl PolicyOptions {
    /// Load options from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options from an arbitrary key lookup (unset keys keep defaults).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        if let Some(raw) = lookup(ALLOW_SELF_APPROVAL_ENV) {
            options.allow_self_approval = parse_bool(ALLOW_SELF_APPROVAL_ENV, &raw)?;
        }
        tracing::debug!(allow_self_approval = options.allow_self_approval, "policy options loaded");
        Ok(options)
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_string(),
        }),
    }
}
