//! Fetch module
//!
//! `Fetcher` resolves a request URI (or takes a pagination link as-is),
//! performs a GET through an injected `ApiClient` and decodes the JSON body
//! into the caller's type.
//!
//! `Page` and `Links` model the common `{ "data": [...], "links": {...} }`
//! envelope so a collection can be walked link by link.

mod fetcher;
mod page;

pub use fetcher::Fetcher;
pub use page::{Links, Page};
