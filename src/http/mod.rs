//! HTTP module
//!
//! The two collaborators the fetcher depends on:
//!
//! - **`UriResolve`**: turns an endpoint plus a `ParameterSet` into a request URI
//! - **`ApiClient`**: performs a GET and hands back the raw body
//!
//! `UriResolver` and the reqwest-backed `HttpClient` are the default
//! implementations. Retries, rate limiting and auth are left to callers.

mod client;
mod resolve;

pub use client::{ApiClient, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use resolve::{UriResolve, UriResolver};
