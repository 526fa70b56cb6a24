//! In-memory TTL cache.
//!
//! Expiry is lazy: an expired entry is removed when it is read, and
//! [`MemoryCache::size`] purges every expired entry before counting.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

#[derive(Debug)]
pub struct MemoryCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone> MemoryCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().await.insert(key.into(), entry);
    }

    /// Returns the live value for `key`, evicting it if it has expired.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get(key)?;
        if entry.is_expired(Instant::now()) {
            entries.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    pub async fn has(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    pub async fn delete(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Number of live entries.
    pub async fn size(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let cache = MemoryCache::new();
        cache.set("menus", 7_u32, MINUTE).await;
        assert_eq!(cache.get("menus").await, Some(7));
        assert!(cache.has("menus").await);
        assert_eq!(cache.get("other").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_evicted_on_read() {
        let cache = MemoryCache::new();
        cache.set("menus", "fresh", MINUTE).await;

        tokio::time::advance(MINUTE + Duration::from_secs(1)).await;

        assert_eq!(cache.get("menus").await, None);
        assert!(cache.entries.lock().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn entry_is_live_until_ttl_elapses() {
        let cache = MemoryCache::new();
        cache.set("menus", 1_u8, MINUTE).await;
        tokio::time::advance(MINUTE).await;
        assert!(cache.has("menus").await);
    }

    #[tokio::test(start_paused = true)]
    async fn size_purges_expired_entries() {
        let cache = MemoryCache::new();
        cache.set("short", 1_u8, MINUTE).await;
        cache.set("long", 2_u8, MINUTE * 10).await;
        assert_eq!(cache.size().await, 2);

        tokio::time::advance(MINUTE * 2).await;

        assert_eq!(cache.size().await, 1);
        assert!(!cache.entries.lock().await.contains_key("short"));
    }

    #[tokio::test]
    async fn set_replaces_and_delete_removes() {
        let cache = MemoryCache::new();
        cache.set("menus", 1_u8, MINUTE).await;
        cache.set("menus", 2_u8, MINUTE).await;
        assert_eq!(cache.get("menus").await, Some(2));

        cache.delete("menus").await;
        assert!(!cache.has("menus").await);
    }

    #[tokio::test]
    async fn clear_empties_cache() {
        let cache = MemoryCache::new();
        cache.set("a", 1_u8, MINUTE).await;
        cache.set("b", 2_u8, MINUTE).await;
        cache.clear().await;
        assert_eq!(cache.size().await, 0);
    }
}
