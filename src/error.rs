//! Error types for pagefetch
//!
//! Every fallible operation in the crate returns `Result<T, Error>`.
//! The fetch path produces three kinds of failure (resolution, transport,
//! decode); `Error::kind` classifies any error into one of them.

use thiserror::Error;

/// The main error type for pagefetch
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Resolution Errors
    // ============================================================================
    /// Endpoint and parameters could not be turned into a request URI
    #[error("failed to resolve request URI (endpoint: '{endpoint}', query: '{query}'): {message}")]
    Resolve {
        /// Endpoint as given by the caller
        endpoint: String,
        /// Parameter set rendered as a query string
        query: String,
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// reqwest failed to send the request or read the body
    #[error("failed to perform request: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("failed to perform request: HTTP {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body, empty if unreadable
        body: String,
    },

    /// The URI handed to the client could not be parsed
    #[error("failed to perform request: invalid URI '{uri}': {message}")]
    InvalidUri {
        /// Offending URI
        uri: String,
        /// Parser message
        message: String,
    },

    /// Any other transport failure reported by a client
    #[error("failed to perform request: {message}")]
    Transport {
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // Decode Errors
    // ============================================================================
    /// Body is not JSON of the expected shape
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Generic configuration problem
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required config field is absent or blank
    #[error("Missing required config field: {field}")]
    MissingConfigField {
        /// Field name
        field: String,
    },

    /// A config value or flag could not be parsed
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue {
        /// Field, variable or flag name
        field: String,
        /// What went wrong
        message: String,
    },

    /// Config file is not valid YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// A file could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// File that was being read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Anything else, usually an error with added context
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Endpoint and parameters could not be turned into a request URI
    Resolution,
    /// The HTTP GET did not complete successfully
    Transport,
    /// The response body was not JSON of the expected shape
    Decode,
    /// Bad or missing configuration
    Config,
    /// Anything else
    Other,
}

impl Error {
    /// Create a resolution error
    pub fn resolve(
        endpoint: impl Into<String>,
        query: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Resolve {
            endpoint: endpoint.into(),
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid URI error
    pub fn invalid_uri(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUri {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Create a generic transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an I/O error for `path`
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Resolve { .. } => ErrorKind::Resolution,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::InvalidUri { .. }
            | Error::Transport { .. } => ErrorKind::Transport,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_) => ErrorKind::Config,
            Error::Io { .. } | Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Check if a caller could reasonably retry the request.
    ///
    /// Nothing in this crate retries; the answer is advisory.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for pagefetch
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
