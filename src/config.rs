//! Fetcher configuration
//!
//! Loaded from YAML, optionally overridden from the environment, then turned
//! into an `HttpClientConfig` / `Fetcher`.
//!
//! ```yaml
//! base_url: https://api.example.com/v3
//! timeout_secs: 10
//! headers:
//!   Accept: application/vnd.api+json
//! ```

use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "PAGEFETCH_BASE_URL";
/// Environment variable overriding `timeout_secs`
pub const ENV_TIMEOUT_SECS: &str = "PAGEFETCH_TIMEOUT_SECS";
/// Environment variable overriding `user_agent`
pub const ENV_USER_AGENT: &str = "PAGEFETCH_USER_AGENT";

/// Configuration for a fetcher and its HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Base URL that endpoints and relative links are joined onto
    #[serde(default)]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("pagefetch/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            headers: StringMap::new(),
        }
    }
}

impl FetcherConfig {
    /// Create a config for a base URL with defaults for everything else
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override fields from `PAGEFETCH_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| Error::InvalidConfigValue {
                field: ENV_TIMEOUT_SECS.to_string(),
                message: format!("expected whole seconds, got '{timeout}'"),
            })?;
        }
        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            self.user_agent = user_agent;
        }
        Ok(())
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        Ok(())
    }

    /// Convert to an HTTP client config
    pub fn to_client_config(&self) -> Result<HttpClientConfig> {
        self.validate()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.trim())
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(self.user_agent.as_str());
        for (key, value) in &self.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        Ok(builder.build())
    }

    /// Build a fetcher over a fresh `HttpClient`
    pub fn build_fetcher(&self) -> Result<Fetcher<HttpClient>> {
        let client = HttpClient::with_config(self.to_client_config()?)?;
        Ok(Fetcher::new(client))
    }
}

/// Load a config from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<FetcherConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    load_config_from_str(&content)
}

/// Load a config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<FetcherConfig> {
    let config: FetcherConfig = serde_yaml::from_str(yaml)?;
    Ok(config)
}
