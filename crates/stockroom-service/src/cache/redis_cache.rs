//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool, PoolConfig, Runtime};
use std::sync::Arc;
use std::time::Duration;
use stockroom_config::RedisConfig;
use stockroom_core::{HealthStatus, StockroomError, StockroomResult};
use tracing::{debug, info};

/// Redis-based cache service.
///
/// Built without a pool it behaves as a disabled cache: every read misses
/// and every write is a no-op.
#[derive(Clone)]
pub struct RedisCacheService {
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> StockroomResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                StockroomError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(StockroomError::Cache("Cache is disabled".to_string())),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.pool.is_some())
            .finish()
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> StockroomResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            StockroomError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> StockroomResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| StockroomError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StockroomResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            StockroomError::Cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn health_check(&self) -> HealthStatus {
        if !self.is_enabled() {
            return HealthStatus::Disabled;
        }

        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(e) => return HealthStatus::Unhealthy(e.to_string()),
        };

        let pong: Result<String, _> = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await;
        match pong {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(format!("PING failed: {}", e)),
        }
    }
}

/// Creates a Redis connection pool from configuration.
///
/// No connection is opened here. Call [`CacheInterface::health_check`] to
/// verify the server is reachable.
pub fn create_redis_pool(config: &RedisConfig) -> StockroomResult<Arc<Pool>> {
    info!("Creating Redis connection pool (max {} connections)", config.pool_size);

    let mut pool_config = PoolConfig::new(config.pool_size);
    pool_config.timeouts.wait = Some(config.wait_timeout());
    pool_config.timeouts.create = Some(config.wait_timeout());

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(pool_config);

    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| StockroomError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    Ok(Arc::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
        assert_eq!(cache.get_raw("product:1").await.unwrap(), None);
        cache
            .set_raw("product:1", "{}", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!cache.delete("product:1").await.unwrap());
        assert_eq!(cache.health_check().await, HealthStatus::Disabled);
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_errors() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:1/0".to_string(),
            wait_timeout_secs: 1,
            ..RedisConfig::default()
        };
        let cache = RedisCacheService::new(create_redis_pool(&config).unwrap());

        let err = cache.get_raw("product:1").await.unwrap_err();
        assert!(matches!(err, StockroomError::Cache(_)));
        assert!(cache.health_check().await.is_unhealthy());
    }
}
