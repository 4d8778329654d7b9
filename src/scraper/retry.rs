//! Retry policy for transient fetch failures
//!
//! GET requests are retried with exponential backoff on transient
//! conditions only: HTTP 429/500/502/503/504, timeouts, and connect
//! failures. Any other error propagates immediately.

use std::future::Future;
use std::time::Duration;

use crate::ScrapeError;

/// Total attempts per request, including the first
pub const MAX_ATTEMPTS: u32 = 3;

/// Base delay for exponential backoff: `BACKOFF_BASE * 2^attempt`
pub const BACKOFF_BASE: Duration = Duration::from_millis(400);

/// Returns `true` if `err` represents a transient condition worth retrying.
///
/// Retriable: HTTP 429, 500, 502, 503, 504; request timeouts; connect
/// failures. Non-retriable: every other HTTP status (e.g. 403, 404) and
/// non-network errors, which would fail the same way again.
fn is_transient(err: &ScrapeError) -> bool {
    match err {
        ScrapeError::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
        ScrapeError::Timeout { .. } => true,
        ScrapeError::Network { source, .. } => source.is_connect() || source.is_timeout(),
        _ => false,
    }
}

/// Executes `operation` up to [`MAX_ATTEMPTS`] times, sleeping
/// `base * 2^attempt` between attempts on transient errors.
///
/// Non-transient errors are returned immediately without sleeping. When all
/// attempts fail, the last error is returned.
pub async fn retry_with_backoff<T, F, Fut>(
    base: Duration,
    mut operation: F,
) -> Result<T, ScrapeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_transient(&err) || attempt + 1 >= MAX_ATTEMPTS {
                    return Err(err);
                }

                let delay = base * 2u32.pow(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient fetch error, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
