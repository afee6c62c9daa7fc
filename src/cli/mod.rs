//! CLI module
//!
//! Command-line interface for fetching pages.
//!
//! # Commands
//!
//! - `get` - Resolve an endpoint with query parameters and print the page
//! - `link` - Print the page behind a pagination link
//! - `all` - Follow `next` links and print every record

mod commands;
mod runner;

pub use commands::{Cli, Commands, OrderArg, QueryArgs};
pub use runner::Runner;
