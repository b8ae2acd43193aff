//! Remote store configuration loaded from the environment.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the store base URL.
pub const API_URL_VAR: &str = "TASKBOARD_API_URL";

/// Environment variable holding the per-request timeout in seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "TASKBOARD_REQUEST_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    #[error("failed to parse environment variable '{key}': {details}")]
    Parse {
        /// Variable name.
        key: String,
        /// Why the value was rejected.
        details: String,
    },
}

/// Connection settings for the HTTP task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base URL the `/api/tasks` routes are resolved against.
    pub base_url: String,
    /// Timeout applied to each request.
    pub request_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Loads configuration from the environment, falling back to defaults for
    /// unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the URL is blank or the timeout is
    /// not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default(API_URL_VAR, DEFAULT_API_URL);
        if base_url.trim().is_empty() {
            return Err(ConfigError::Parse {
                key: API_URL_VAR.to_owned(),
                details: "value must not be empty".to_owned(),
            });
        }

        let timeout_secs = match env::var(REQUEST_TIMEOUT_VAR) {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: base_url.trim().to_owned(),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_timeout_secs(raw: &str) -> Result<u64, ConfigError> {
    let parse_error = |details: String| ConfigError::Parse {
        key: REQUEST_TIMEOUT_VAR.to_owned(),
        details,
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|err| parse_error(err.to_string()))?;
    if secs == 0 {
        return Err(parse_error("timeout must be at least one second".to_owned()));
    }
    Ok(secs)
}
