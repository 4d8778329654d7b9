use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the extraction strategy used when a course does not specify one
pub const DEFAULT_PARSER: &str = "generic_events";

/// A configured target site: one golf facility with one or more URLs to scan.
///
/// Loaded once per run and never mutated. Descriptive metadata (`location`,
/// `phone`, anything in `extra`) is passed through to output records as-is.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Course {
    /// Unique course name; filled from the config map key when absent
    #[serde(default)]
    pub name: String,

    /// Ordered list of URLs to attempt for this course
    #[serde(default)]
    pub urls: Vec<String>,

    /// Human-readable location, e.g. "South Lake Tahoe"
    #[serde(default)]
    pub location: Option<String>,

    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Name of the extraction strategy to use for this course
    #[serde(default = "default_parser")]
    pub parser: String,

    /// Any other metadata from the config entry, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_parser() -> String {
    DEFAULT_PARSER.to_string()
}

/// Runtime options for a scrape run, mapped directly from the CLI
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Maximum number of course jobs running concurrently
    pub concurrency: usize,

    /// Whether successful GET responses are cached for the freshness window
    pub enable_cache: bool,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            enable_cache: true,
            timeout_secs: 15,
        }
    }
}
