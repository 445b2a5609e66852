//! Certificate fetcher configuration with validation.
//!
//! Timeouts live here, on the transport, and nowhere in the validation core.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error("Invalid user agent: {0}")]
    InvalidUserAgent(String),
    #[error("HTTP client could not be built: {0}")]
    Client(String),
}

/// HTTP certificate fetcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Whole-request timeout in seconds
    pub request_timeout: u64,
    /// TCP/TLS connect timeout in seconds
    pub connect_timeout: u64,
    /// `User-Agent` header sent with every fetch
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout: 10,
            connect_timeout: 5,
            user_agent: concat!("sns-message-validator/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetcherConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::InvalidTimeout(
                "connect_timeout cannot be 0".into(),
            ));
        }

        if self.connect_timeout > self.request_timeout {
            return Err(ConfigError::InvalidTimeout(
                "connect_timeout cannot exceed request_timeout".into(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidUserAgent(
                "user_agent cannot be empty".into(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}
