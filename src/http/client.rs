//! HTTP client
//!
//! `ApiClient` is the capability the fetcher consumes. `HttpClient` is the
//! reqwest implementation: one GET per call, non-2xx treated as failure,
//! body returned as raw bytes.

use super::resolve::{is_absolute, UriResolver};
use super::UriResolve;
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP GET plus URI resolution
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Resolver used to build request URIs from endpoints
    type Resolver: UriResolve;

    /// Perform a GET and return the raw response body
    async fn get(&self, uri: &str) -> Result<Bytes>;

    /// Access the resolver
    fn resolve(&self) -> &Self::Resolver;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative endpoints and links
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("pagefetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// reqwest-backed [`ApiClient`]
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    resolver: UriResolver,
}

impl HttpClient {
    /// Create a client for a base URL with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(HttpClientConfig::builder().base_url(base_url).build())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let resolver = match config.base_url.as_deref() {
            Some(base) => UriResolver::with_base(base)?,
            None => UriResolver::new(),
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            resolver,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Build full URL from a link or path
    fn build_url(&self, uri: &str) -> String {
        if is_absolute(uri) {
            return uri.to_string();
        }

        match self.resolver.base() {
            Some(base) => {
                let base = base.as_str().trim_end_matches('/');
                let path = uri.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => uri.to_string(),
        }
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    type Resolver = UriResolver;

    async fn get(&self, uri: &str) -> Result<Bytes> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(Error::invalid_uri(uri, "empty URI"));
        }

        let full_url = self.build_url(uri);
        let url = Url::parse(&full_url).map_err(|e| Error::invalid_uri(&full_url, e.to_string()))?;

        let mut req = self.client.get(url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GET {} failed with {}", full_url, status.as_u16());
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: GET {}", full_url);
        Ok(response.bytes().await?)
    }

    fn resolve(&self) -> &UriResolver {
        &self.resolver
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
