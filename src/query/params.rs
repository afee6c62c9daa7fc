//! Typed paging and filter parameters
//!
//! Follows the JSON:API style used by most paged REST APIs:
//! `page[limit]`, `page[number]`, `page[cursor]`, `page[order]`,
//! `filter[<name>]` and a comma-joined `include`.

use super::types::{ParameterSet, QueryParams};
use crate::types::SortOrder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Paging, filtering and include parameters for a collection endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Page size
    #[serde(default)]
    pub limit: Option<u64>,
    /// Page number for numbered paging
    #[serde(default)]
    pub number: Option<u64>,
    /// Opaque cursor for cursor paging
    #[serde(default)]
    pub cursor: Option<String>,
    /// Sort order
    #[serde(default)]
    pub order: Option<SortOrder>,
    /// Filters by field name
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    /// Related resources to include
    #[serde(default)]
    pub includes: Vec<String>,
}

impl PageParams {
    /// Create empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the page number
    #[must_use]
    pub fn number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Set the cursor
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Add a filter
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    /// Add an include
    #[must_use]
    pub fn include(mut self, resource: impl Into<String>) -> Self {
        self.includes.push(resource.into());
        self
    }
}

impl QueryParams for PageParams {
    fn prepare(&self) -> ParameterSet {
        let mut set = ParameterSet::new();

        if let Some(limit) = self.limit {
            set.append("page[limit]", limit.to_string());
        }
        if let Some(number) = self.number {
            set.append("page[number]", number.to_string());
        }
        if let Some(ref cursor) = self.cursor {
            set.append("page[cursor]", cursor.as_str());
        }
        if let Some(order) = self.order {
            set.append("page[order]", order.as_str());
        }
        for (name, value) in &self.filters {
            set.append(format!("filter[{name}]"), value.as_str());
        }
        if !self.includes.is_empty() {
            set.append("include", self.includes.join(","));
        }

        set
    }
}
