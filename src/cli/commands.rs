//! CLI commands and argument parsing

use crate::types::SortOrder;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fetch and decode pages from a REST API
#[derive(Parser, Debug)]
#[command(name = "pagefetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL (overrides config file and environment)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Extra request header, as 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header", global = true, value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub pretty: bool,

    /// Verbose output (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter directives: `rust_log` when set, otherwise a level chosen
    /// by `--verbose`
    pub fn log_directives(&self, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim) {
            Some(directives) if !directives.is_empty() => directives.to_string(),
            _ if self.verbose => "debug".to_string(),
            _ => "info".to_string(),
        }
    }

    /// Fallback directives when `log_directives` does not parse
    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page of an endpoint
    Get {
        /// Endpoint path, relative to the base URL
        endpoint: String,

        /// Query parameters
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Fetch the page behind a pagination link
    Link {
        /// Complete link, as returned in a previous page
        link: String,
    },

    /// Fetch every page of an endpoint and print all records
    All {
        /// Endpoint path, relative to the base URL
        endpoint: String,

        /// Query parameters
        #[command(flatten)]
        query: QueryArgs,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

/// Query parameters accepted by `get` and `all`
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Raw query parameter (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u64>,

    /// Page number
    #[arg(long)]
    pub number: Option<u64>,

    /// Page cursor
    #[arg(long)]
    pub cursor: Option<String>,

    /// Sort order
    #[arg(long)]
    pub order: Option<OrderArg>,

    /// Filter (repeatable)
    #[arg(long = "filter", value_name = "NAME=VALUE")]
    pub filters: Vec<String>,

    /// Related resource to include (repeatable)
    #[arg(long = "include")]
    pub includes: Vec<String>,
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OrderArg {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}
