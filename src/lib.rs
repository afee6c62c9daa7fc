//! # pagefetch
//!
//! Fetch-and-decode helper for paginated REST APIs.
//!
//! Given an endpoint and query parameters, or a pagination link returned by
//! a previous page, pagefetch resolves the request URI, performs a GET through
//! an injected client and decodes the JSON body into the caller's type.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagefetch::{Fetcher, HttpClient, Page, PageParams, Result};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Asset {
//!     id: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let fetcher = Fetcher::new(HttpClient::new("https://api.example.com/v3")?);
//!
//!     let params = PageParams::new().limit(50).filter("state", "active");
//!     let page: Page<Asset> = fetcher.get_page("/assets", &params).await?;
//!
//!     if let Some(link) = page.next_link() {
//!         let next: Page<Asset> = fetcher.page_from_link(link).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every failure surfaces as an [`Error`]; [`Error::kind`] tells resolution,
//! transport and decode failures apart. Nothing is retried here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query parameters and parameter sets
pub mod query;

/// HTTP client and URI resolution
pub mod http;

/// Fetcher and paged responses
pub mod fetch;

/// Configuration loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use fetch::{Fetcher, Links, Page};
pub use http::{ApiClient, HttpClient, HttpClientConfig, UriResolve, UriResolver};
pub use query::{PageParams, ParameterSet, QueryParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
