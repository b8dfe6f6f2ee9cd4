//! In-memory cache with a fixed time-to-live.
//!
//! The cache is an ordinary value: whoever calls a skill creates one and
//! passes it in, so there is no process-wide state. Expired entries are kept
//! and can still be read with [`TtlCache::get_stale`], which lets a skill fall
//! back to old data when a refresh fails.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Maximum number of keys before the oldest entries are evicted.
const MAX_ENTRIES: usize = 256;

#[derive(Debug, Clone)]
struct Cached<V> {
    value: V,
    fetched_at: Instant,
}

/// Keyed cache whose entries are fresh for `ttl` after insertion.
///
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    entries: Arc<Mutex<HashMap<K, Cached<V>>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the value if it was inserted less than `ttl` ago.
    pub fn get_fresh(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.value.clone())
    }

    /// Returns the value regardless of age.
    pub fn get_stale(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).map(|cached| cached.value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= MAX_ENTRIES && !entries.contains_key(&key) {
            // Remove ~10% of the oldest entries.
            let mut ages: Vec<_> = entries
                .iter()
                .map(|(k, v)| (k.clone(), v.fetched_at))
                .collect();
            ages.sort_by_key(|(_, t)| *t);
            let to_remove = (ages.len() / 10).max(1);
            for (old, _) in ages.into_iter().take(to_remove) {
                entries.remove(&old);
            }
        }
        entries.insert(
            key,
            Cached {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fresh_until_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 1);
        assert_eq!(cache.get_fresh(&"k"), Some(1));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get_fresh(&"k"), Some(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get_fresh(&"k"), None);
        assert_eq!(cache.get_stale(&"k"), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn insert_refreshes_age() {
        let cache = TtlCache::new(Duration::from_secs(10));
        cache.insert("k", "old");
        tokio::time::advance(Duration::from_secs(30)).await;
        cache.insert("k", "new");
        assert_eq!(cache.get_fresh(&"k"), Some("new"));
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let cache = TtlCache::new(Duration::from_secs(10));
        let other = cache.clone();
        other.insert(1u8, "x");
        assert_eq!(cache.get_fresh(&1), Some("x"));
        cache.clear();
        assert!(other.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn evicts_oldest_at_capacity() {
        let cache = TtlCache::new(Duration::from_secs(3600));
        for i in 0..MAX_ENTRIES {
            cache.insert(i, i);
            tokio::time::advance(Duration::from_millis(1)).await;
        }
        cache.insert(MAX_ENTRIES, MAX_ENTRIES);
        assert!(cache.len() <= MAX_ENTRIES);
        assert_eq!(cache.get_stale(&0), None);
        assert_eq!(cache.get_stale(&MAX_ENTRIES), Some(MAX_ENTRIES));
    }
}
