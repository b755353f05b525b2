//! Read-through cache for upstream API responses
//!
//! SQLite-backed with per-entry TTL, keyed by request signature. The cache
//! is a pure performance layer: every failure path degrades to a miss, and
//! an unconfigured cache directory disables it entirely.

pub mod key;
pub mod storage;

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

pub use key::request_signature;
pub use storage::CacheStorage;

/// Read-through response cache consulted by the pagination walker.
///
/// When disabled, `lookup` always misses and `store` is a no-op.
pub struct ResponseCache {
    storage: Option<Mutex<CacheStorage>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Build a cache rooted at `dir`, or a disabled cache when `dir` is None.
    ///
    /// A directory that cannot be opened also degrades to disabled, with a
    /// warning, rather than failing the run.
    pub fn new(dir: Option<&Path>, ttl: Duration) -> Self {
        let storage = dir.and_then(|d| match CacheStorage::open_at(d) {
            Ok(s) => Some(Mutex::new(s)),
            Err(e) => {
                log::warn!("Response cache unavailable, continuing without: {}", e);
                None
            }
        });
        Self { storage, ttl }
    }

    /// A cache that never hits
    pub fn disabled() -> Self {
        Self {
            storage: None,
            ttl: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.storage.is_some()
    }

    /// Look up a body by request signature. Expired, absent, and unreadable
    /// entries all report a miss.
    pub fn lookup(&self, signature: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        let guard = storage.lock().ok()?;
        match guard.get(signature) {
            Ok(hit) => hit,
            Err(e) => {
                log::warn!("Cache lookup failed, treating as miss: {}", e);
                None
            }
        }
    }

    /// Store a freshly fetched body under its request signature.
    /// Failures are logged and swallowed.
    pub fn store(&self, signature: &str, endpoint: &str, body: &str) {
        if let Some(storage) = self.storage.as_ref()
            && let Ok(guard) = storage.lock()
            && let Err(e) = guard.put(signature, endpoint, body, self.ttl)
        {
            log::warn!("Failed to cache response for {}: {}", endpoint, e);
        }
    }
}
