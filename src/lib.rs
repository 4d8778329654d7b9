//! Fairway-Scout: a golf course event scraper
//!
//! This crate fetches public web pages for a configured set of golf courses,
//! scans their textual content for program/event mentions (tournaments,
//! lessons, camps, leagues), extracts structured attributes via pattern
//! matching, deduplicates the candidates, and emits JSON plus a plain-text
//! summary.

pub mod config;
pub mod output;
pub mod parsers;
pub mod records;
pub mod scraper;

use thiserror::Error;

/// Main error type for Fairway-Scout operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Fairway-Scout operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::{Course, ScrapeOptions};
pub use crate::records::{ErrorRecord, EventRecord, ScrapeResult};
pub use crate::scraper::{HttpClient, Scraper};
