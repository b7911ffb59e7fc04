/// Startup configuration for the server
///
/// None of this is per-request: API keys arrive with each tool call.

use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default Linear GraphQL endpoint
pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";

/// Default HTTP timeout for a Linear call, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid Linear API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Timeout must be at least 1 second")]
    ZeroTimeout,
}

/// Settings the server needs before it can accept requests
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Linear GraphQL endpoint
    pub api_url: Url,
    /// Per-call HTTP timeout
    pub timeout: Duration,
}

impl ServerConfig {
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        let url = Url::parse(api_url).map_err(|e| ConfigError::InvalidUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: api_url.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            api_url: url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default Linear URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
