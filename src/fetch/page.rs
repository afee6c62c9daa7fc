//! Paged response envelope

use serde::{Deserialize, Serialize};

/// Pagination links of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Link to this page
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Link to the first page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Link to the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Link to the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Link to the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

/// One page of a collection: records plus links to neighbouring pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Links to neighbouring pages
    #[serde(default)]
    pub links: Links,
}

impl<T> Page<T> {
    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the page carries no records
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The `next` link, ignoring blank values
    pub fn next_link(&self) -> Option<&str> {
        self.links
            .next
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            links: Links::default(),
        }
    }
}
