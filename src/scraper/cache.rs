//! In-memory response cache for GET requests
//!
//! Successful response bodies are cached per URL for a fixed freshness
//! window; a fresh hit returns identical text without a network call. The
//! store is shared read/write across all worker tasks, so access goes
//! through a mutex.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Freshness window for cached responses
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    body: String,
    fetched_at: Instant,
}

/// A thread-safe URL → body cache with per-entry expiry
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached body for `url` if present and still fresh.
    /// Stale entries are evicted on lookup.
    pub fn get(&self, url: &str) -> Option<String> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");

        match entries.get(url) {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => Some(entry.body.clone()),
            Some(_) => {
                entries.remove(url);
                None
            }
            None => None,
        }
    }

    /// Stores a response body for `url`, replacing any previous entry
    pub fn insert(&self, url: &str, body: String) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            url.to_string(),
            CacheEntry {
                body,
                fetched_at: Instant::now(),
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }
}
