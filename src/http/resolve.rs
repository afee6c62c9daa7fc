//! Request URI resolution
//!
//! Combines a base location, an endpoint path and a parameter set into a
//! fully qualified URI.

use crate::error::{Error, Result};
use crate::query::ParameterSet;
use url::Url;

/// Resolves an endpoint and its parameters into a request URI
pub trait UriResolve: Send + Sync {
    /// Build the full request URI.
    ///
    /// Failures must be reported as [`Error::Resolve`], carrying the endpoint
    /// and the rendered parameters.
    fn uri(&self, endpoint: &str, params: &ParameterSet) -> Result<String>;
}

/// Default resolver: joins relative endpoints onto an optional base URL
#[derive(Debug, Clone, Default)]
pub struct UriResolver {
    base: Option<Url>,
}

impl UriResolver {
    /// Create a resolver without a base; only absolute endpoints resolve
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with a base URL
    pub fn with_base(base: &str) -> Result<Self> {
        let mut base = Url::parse(base)
            .map_err(|e| Error::config(format!("Invalid base URL '{base}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!("'{base}' cannot be used as a base URL")));
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base: Some(base) })
    }

    /// The base URL, if any
    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }
}

impl UriResolve for UriResolver {
    fn uri(&self, endpoint: &str, params: &ParameterSet) -> Result<String> {
        let fail = |message: String| Error::resolve(endpoint, params.to_string(), message);

        let endpoint_trimmed = endpoint.trim();
        if endpoint_trimmed.is_empty() {
            return Err(fail("endpoint is empty".to_string()));
        }

        let mut url = if is_absolute(endpoint_trimmed) {
            Url::parse(endpoint_trimmed).map_err(|e| fail(e.to_string()))?
        } else {
            let base = self
                .base
                .as_ref()
                .ok_or_else(|| fail("relative endpoint and no base URL".to_string()))?;
            let joined = format!(
                "{}/{}",
                base.as_str().trim_end_matches('/'),
                endpoint_trimmed.trim_start_matches('/')
            );
            Url::parse(&joined).map_err(|e| fail(e.to_string()))?
        };

        // Appends after any query the endpoint already carries
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        Ok(url.to_string())
    }
}

/// True if `uri` starts with an http(s) scheme, in any case
pub(crate) fn is_absolute(uri: &str) -> bool {
    has_scheme(uri, "http://") || has_scheme(uri, "https://")
}

fn has_scheme(uri: &str, scheme: &str) -> bool {
    uri.get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}
