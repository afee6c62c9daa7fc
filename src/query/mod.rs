//! Query parameter module
//!
//! Turns caller-defined query objects into the flat key/value form that
//! goes on the wire.
//!
//! # Overview
//!
//! - `ParameterSet` - ordered multimap of string pairs
//! - `QueryParams` - anything that can `prepare()` a `ParameterSet`
//! - `PageParams` - typed paging/filter parameters (`page[limit]`, `filter[...]`, ...)

mod params;
mod types;

pub use params::PageParams;
pub use types::{ParameterSet, QueryParams};
