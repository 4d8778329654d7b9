//! Scrape pipeline: HTTP client, response cache, retry policy, and the
//! run orchestrator.

mod cache;
mod http;
mod orchestrator;
mod retry;

pub use cache::ResponseCache;
pub use http::HttpClient;
pub use orchestrator::Scraper;
