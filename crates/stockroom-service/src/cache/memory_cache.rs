//! Process-local cache.

use super::CacheInterface;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use stockroom_core::{HealthStatus, StockroomError, StockroomResult};
use tokio::sync::RwLock;

/// In-memory cache with per-entry expiry.
///
/// Backs the `memory` cache backend and stands in for Redis in tests.
/// Expired entries are dropped lazily on read.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, (String, Instant)>>,
    unavailable: AtomicBool,
}

impl InMemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with a cache error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Returns the stored payload without expiry or availability checks.
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .await
            .get(key)
            .map(|(value, _)| value.clone())
    }

    fn check_available(&self) -> StockroomResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StockroomError::cache("in-memory cache marked unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> StockroomResult<Option<String>> {
        self.check_available()?;

        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((value, expires_at)) if *expires_at > now => return Ok(Some(value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        self.entries.write().await.remove(key);
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> StockroomResult<()> {
        self.check_available()?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> StockroomResult<bool> {
        self.check_available()?;
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn health_check(&self) -> HealthStatus {
        match self.check_available() {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = InMemoryCache::new();
        cache
            .set_raw("product:1", "payload", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(
            cache.get_raw("product:1").await.unwrap().as_deref(),
            Some("payload")
        );
        assert!(cache.delete("product:1").await.unwrap());
        assert!(!cache.delete("product:1").await.unwrap());
        assert_eq!(cache.get_raw("product:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_misses() {
        let cache = InMemoryCache::new();
        cache
            .set_raw("product:1", "payload", Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(cache.get_raw("product:1").await.unwrap(), None);
        assert_eq!(cache.peek("product:1").await, None);
    }

    #[tokio::test]
    async fn test_unavailable_cache_errors() {
        let cache = InMemoryCache::new();
        cache.set_unavailable(true);

        assert!(cache.get_raw("product:1").await.is_err());
        assert!(cache
            .set_raw("product:1", "x", Duration::from_secs(1))
            .await
            .is_err());
        assert!(cache.delete("product:1").await.is_err());
        assert!(cache.health_check().await.is_unhealthy());
    }
}
