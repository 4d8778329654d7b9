//! HTTP client for fetching page text
//!
//! Wraps a pooled `reqwest` client with the crate's resiliency policy:
//! transparent caching of successful GETs, retry with exponential backoff on
//! transient failures, typed errors for everything else, and a
//! content-based charset fallback for servers that declare no encoding.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::ScrapeOptions;
use crate::scraper::cache::{ResponseCache, DEFAULT_TTL};
use crate::scraper::retry::{retry_with_backoff, BACKOFF_BASE};
use crate::ScrapeError;

/// Upper bound on idle pooled connections per host
const POOL_MAX_IDLE_PER_HOST: usize = 20;

/// How far into the body to look for a `<meta charset>` declaration
const META_SNIFF_LEN: usize = 1024;

const USER_AGENT: &str = concat!(
    "fairway-scout/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/fairway-scout)"
);

/// HTTP client shared across all worker tasks.
///
/// The cache is selected at construction time: when `enable_cache` is off
/// the client is a plain pooled session with no cache store at all.
pub struct HttpClient {
    client: Client,
    cache: Option<ResponseCache>,
    timeout: Duration,
}

impl HttpClient {
    /// Builds a client from the run options.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Reqwest`] if the underlying client cannot be
    /// constructed (e.g. invalid TLS configuration).
    pub fn new(options: &ScrapeOptions) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .gzip(true)
            .brotli(true)
            .build()?;

        let cache = options.enable_cache.then(|| ResponseCache::new(DEFAULT_TTL));

        Ok(Self {
            client,
            cache,
            timeout: Duration::from_secs(options.timeout_secs),
        })
    }

    /// Fetches a URL and returns its decoded text.
    ///
    /// A fresh cache hit returns identical text without a network call.
    /// Transient failures (HTTP 429/500/502/503/504, timeouts, connect
    /// errors) are retried up to 3 attempts total before the error
    /// surfaces; other non-2xx statuses propagate immediately as
    /// [`ScrapeError::Http`].
    pub async fn get_text(&self, url: &str) -> Result<String, ScrapeError> {
        // Reject anything that is not an absolute http(s) URL up front
        let parsed = Url::parse(url).map_err(|_| ScrapeError::InvalidUrl(url.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ScrapeError::InvalidUrl(url.to_string()));
        }

        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(url) {
                tracing::debug!("Cache hit for {}", url);
                return Ok(body);
            }
        }

        let body = retry_with_backoff(BACKOFF_BASE, || self.fetch_once(url)).await?;

        if let Some(cache) = &self.cache {
            cache.insert(url, body.clone());
        }

        Ok(body)
    }

    /// One GET attempt with no retry handling
    async fn fetch_once(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let declared_charset = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type)
            .map(str::to_owned);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_reqwest_error(url, e))?;

        Ok(decode_body(&bytes, declared_charset.as_deref()))
    }
}

/// Maps reqwest errors to the crate's typed errors
fn classify_reqwest_error(url: &str, e: reqwest::Error) -> ScrapeError {
    if e.is_timeout() {
        ScrapeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScrapeError::Network {
            url: url.to_string(),
            source: e,
        }
    }
}

/// Extracts the charset parameter from a Content-Type header value
fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Decodes a response body to text.
///
/// Uses the server-declared charset when present; otherwise sniffs a
/// `<meta charset>` declaration from the head of the body; otherwise falls
/// back to lossy UTF-8.
fn decode_body(bytes: &[u8], declared_charset: Option<&str>) -> String {
    let label = declared_charset
        .map(str::to_owned)
        .or_else(|| sniff_meta_charset(bytes));

    let encoding = label
        .and_then(|l| encoding_rs::Encoding::for_label(l.as_bytes()))
        .unwrap_or(encoding_rs::UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Looks for `charset=...` within the first kilobyte of the body,
/// covering both `<meta charset="...">` and the http-equiv form
fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_lowercase();

    let start = head.find("charset=")? + "charset=".len();
    let rest = head[start..].trim_start_matches(['"', '\'']);
    let end = rest
        .find(|c: char| c == '"' || c == '\'' || c == '>' || c == ';' || c.is_whitespace())
        .unwrap_or(rest.len());

    let label = rest[..end].trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = HttpClient::new(&ScrapeOptions::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_cache_disabled_builds_plain_session() {
        let options = ScrapeOptions {
            enable_cache: false,
            ..ScrapeOptions::default()
        };
        let client = HttpClient::new(&options).unwrap();
        assert!(client.cache.is_none());
    }

    #[tokio::test]
    async fn test_get_text_rejects_relative_url() {
        let client = HttpClient::new(&ScrapeOptions::default()).unwrap();
        let result = client.get_text("/golf/events").await;
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_get_text_rejects_non_http_scheme() {
        let client = HttpClient::new(&ScrapeOptions::default()).unwrap();
        let result = client.get_text("ftp://example.com/file").await;
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/html; charset=UTF-8"),
            Some("UTF-8")
        );
        assert_eq!(
            charset_from_content_type("text/html; charset=\"iso-8859-1\""),
            Some("iso-8859-1")
        );
        assert_eq!(charset_from_content_type("text/html"), None);
    }

    #[test]
    fn test_decode_body_with_declared_charset() {
        // "café" in ISO-8859-1
        let bytes = [b'c', b'a', b'f', 0xE9];
        assert_eq!(decode_body(&bytes, Some("iso-8859-1")), "café");
    }

    #[test]
    fn test_decode_body_sniffs_meta_charset() {
        let mut bytes = b"<html><head><meta charset=\"windows-1252\"></head><body>caf".to_vec();
        bytes.push(0xE9);
        let text = decode_body(&bytes, None);
        assert!(text.ends_with("café"));
    }

    #[test]
    fn test_decode_body_defaults_to_utf8() {
        let bytes = "caf\u{e9}".as_bytes();
        assert_eq!(decode_body(bytes, None), "café");
    }

    #[test]
    fn test_sniff_http_equiv_form() {
        let head =
            b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=shift_jis\">";
        assert_eq!(sniff_meta_charset(head).as_deref(), Some("shift_jis"));
    }
}
