//! In-memory TTL cache
//!
//! Generic key/value store with per-entry expiry. Expired entries are removed
//! lazily on access and eagerly by the periodic sweep. The cache is advisory:
//! losing it only produces misses, never incorrect data, so there is no
//! transactional contract across get/set pairs (a check-then-act race costs at
//! worst one duplicate upstream call).

use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

/// One cached value with its expiry
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// TTL cache for one namespace
///
/// Uses `tokio::time::Instant` so tests can drive expiry with paused time.
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    /// Store a value; expiry = now + (override or namespace default)
    ///
    /// Overwrites any existing entry for the key. Capacity is unbounded;
    /// memory growth is bounded by the periodic sweep.
    pub fn set(&self, key: impl Into<String>, value: V, ttl_override: Option<Duration>) {
        let ttl = ttl_override.unwrap_or(self.default_ttl);
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Fetch a value if present and unexpired
    ///
    /// An expired entry found here is deleted immediately (lazy eviction).
    pub fn get(&self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => return None,
            Some(entry) => {
                if Instant::now() <= entry.expires_at {
                    return Some(entry.value.clone());
                }
                true
            }
        };

        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Whether the key holds an unexpired value
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Drop every expired entry, independent of access patterns
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at >= now);
        before - self.entries.len()
    }

    /// Number of stored entries (expired-but-unswept entries included)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys, for health reporting
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_get_returns_value_before_expiry() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(60));
        cache.set("k", "v".to_string(), None);
        assert_eq!(cache.get("k"), Some("v".to_string()));
        assert!(cache.has("k"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_absent_after_ttl() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(60));
        cache.set("k", "v".to_string(), None);

        advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get("k"), None);
        // Lazy eviction removed the entry
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_override_beats_default() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(10));
        cache.set("short", 1, None);
        cache.set("long", 2, Some(Duration::from_secs(100)));

        advance(Duration::from_secs(11)).await;
        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.get("long"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_overwrites_existing_entry() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.set("k", 1, None);
        cache.set("k", 2, None);
        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_and_clear() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1, None);
        cache.set("b", 2, None);

        cache.remove("a");
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_sweeps_only_expired() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.set("old", 1, Some(Duration::from_secs(10)));
        cache.set("fresh", 2, None);

        advance(Duration::from_secs(11)).await;
        // Never accessed since expiry, so still resident until the sweep
        assert_eq!(cache.len(), 2);

        let removed = cache.cleanup();
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh"), Some(2));
    }
}
