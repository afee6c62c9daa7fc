//! Fetch-and-decode over an `ApiClient`

use super::page::Page;
use crate::error::{Error, ErrorKind, Result};
use crate::http::{ApiClient, UriResolve};
use crate::query::QueryParams;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches pages from an API and decodes them.
///
/// Holds nothing but the client, so it is as thread-safe as `C` and can be
/// cloned freely. Every call is an independent request/decode round trip;
/// nothing is retried.
pub struct Fetcher<C> {
    client: Arc<C>,
}

impl<C: ApiClient> Fetcher<C> {
    /// Create a fetcher that owns the client
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Create a fetcher over a shared client
    pub fn from_shared(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve `endpoint` with `params`, GET it and decode the body as `T`.
    ///
    /// No request is made if resolution fails.
    pub async fn get_page<T, Q>(&self, endpoint: &str, params: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: QueryParams + ?Sized,
    {
        let uri = self.resolve_uri(endpoint, params)?;
        self.fetch_and_decode(&uri).await
    }

    /// GET an already complete pagination link and decode the body as `T`.
    ///
    /// The link is handed to the client untouched; there is no resolution step.
    pub async fn page_from_link<T: DeserializeOwned>(&self, link: &str) -> Result<T> {
        self.fetch_and_decode(link).await
    }

    /// Follow the `next` link of `page`.
    ///
    /// Returns `None` when the page has no records or no next link.
    pub async fn next_page<T: DeserializeOwned>(&self, page: &Page<T>) -> Result<Option<Page<T>>> {
        if page.is_empty() {
            return Ok(None);
        }
        match page.next_link() {
            Some(link) => self.page_from_link(link).await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetch the first page of `endpoint` and follow `next` links, collecting
    /// every record.
    ///
    /// Stops on an empty page, a missing next link, a next link to a page
    /// already fetched in this walk, or after `max_pages` pages.
    pub async fn collect_all<T, Q>(
        &self,
        endpoint: &str,
        params: &Q,
        max_pages: Option<usize>,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        Q: QueryParams + ?Sized,
    {
        if max_pages == Some(0) {
            return Ok(Vec::new());
        }

        let first_uri = self.resolve_uri(endpoint, params)?;
        let mut page: Page<T> = self.fetch_and_decode(&first_uri).await?;
        let mut pages_fetched = 1;
        let mut seen = HashSet::from([first_uri]);
        let mut records = Vec::new();

        loop {
            let next = if page.is_empty() {
                None
            } else {
                page.next_link().map(str::to_owned)
            };
            records.append(&mut page.data);

            let Some(link) = next else { break };
            if max_pages.is_some_and(|max| pages_fetched >= max) {
                break;
            }
            if seen.contains(&link) {
                warn!("Next link points at an already fetched page, stopping: {}", link);
                break;
            }

            page = self.page_from_link(&link).await?;
            pages_fetched += 1;
            seen.insert(link);
        }

        debug!(
            "Collected {} records from {} over {} pages",
            records.len(),
            endpoint,
            pages_fetched
        );
        Ok(records)
    }

    fn resolve_uri<Q: QueryParams + ?Sized>(&self, endpoint: &str, params: &Q) -> Result<String> {
        let query = params.prepare();
        let uri = self
            .client
            .resolve()
            .uri(endpoint, &query)
            .map_err(|e| match e {
                Error::Resolve { .. } => e,
                other => Error::resolve(endpoint, query.to_string(), other.to_string()),
            })?;

        debug!("Resolved {} -> {}", endpoint, uri);
        Ok(uri)
    }

    async fn fetch_and_decode<T: DeserializeOwned>(&self, uri: &str) -> Result<T> {
        let body = self.client.get(uri).await.map_err(|e| match e.kind() {
            ErrorKind::Transport => e,
            _ => Error::transport(e.to_string()),
        })?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl<C> Clone for Fetcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for Fetcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("client", &self.client)
            .finish()
    }
}
