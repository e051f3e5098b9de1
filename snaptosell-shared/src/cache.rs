/// In-memory expiring key-value cache
///
/// This module provides the process-wide cache used to avoid redundant
/// generation calls. Entries carry an absolute expiry instant; reads evict
/// lazily and a periodic sweep (run by the API binary) evicts proactively.
///
/// # Semantics
///
/// - `insert(key, value, ttl)` stores a value expiring at `now + ttl`
/// - `get(key)` returns the value while `now < expires_at`, otherwise
///   removes the entry and returns `None`
/// - `sweep()` removes every entry whose expiry has passed
/// - Last write wins; there is no LRU, no size bound, and no persistence
///   across restarts
///
/// # Concurrency
///
/// The map sits behind a `Mutex`. Entries are best-effort: a lost write or
/// a stale read only costs an extra generation call, never correctness.
///
/// # Example
///
/// ```
/// use snaptosell_shared::cache::ExpiringCache;
/// use std::time::Duration;
///
/// let cache = ExpiringCache::new();
/// cache.insert("product-42", "A fine description".to_string(), Duration::from_secs(3600));
/// assert_eq!(cache.get("product-42").as_deref(), Some("A fine description"));
/// ```
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default time-to-live applied when callers have no endpoint-specific TTL
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default interval between proactive sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// A single cached value with its expiry instant
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

/// Process-wide cache with per-entry expiry
#[derive(Debug)]
pub struct ExpiringCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> ExpiringCache<T> {
    /// Creates an empty cache
    pub fn new() -> Self {
        ExpiringCache {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a value under `key`, expiring `ttl` from now
    ///
    /// Overwrites any previous entry for the same key, including its expiry.
    pub fn insert(&self, key: impl Into<String>, value: T, ttl: Duration) {
        self.insert_at(Instant::now(), key, value, ttl);
    }

    /// Returns the value for `key` if present and unexpired
    ///
    /// An expired entry is removed as a side effect of the lookup.
    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(Instant::now(), key)
    }

    /// Removes an entry, returning whether one was present
    pub fn remove(&self, key: &str) -> bool {
        self.entries.lock().unwrap().remove(key).is_some()
    }

    /// Removes every expired entry, returning how many were evicted
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    /// Removes all entries
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of entries currently stored (expired entries not yet
    /// evicted are counted)
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Returns true if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_at(&self, now: Instant, key: impl Into<String>, value: T, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: now + ttl,
        };
        self.entries.lock().unwrap().insert(key.into(), entry);
    }

    fn get_at(&self, now: Instant, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().unwrap();

        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| now < entry.expires_at);
        before - entries.len()
    }
}

impl<T: Clone> Default for ExpiringCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
