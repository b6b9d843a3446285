//! Explicit dependency wiring.
//!
//! Every component is built once at startup and handed to its consumers as
//! an `Arc<dyn Trait>`. The concrete store and cache are chosen from
//! configuration:
//!
//! ```text
//! database.backend = mysql  -> MySqlProductRepository (pool + migrations)
//! database.backend = memory -> InMemoryProductRepository
//! redis.enabled = false     -> RedisCacheService::disabled()
//! redis.backend = redis     -> RedisCacheService (pool + startup PING)
//! redis.backend = memory    -> InMemoryCache
//! ```

use deadpool_redis::Pool;
use std::sync::Arc;
use std::time::Duration;
use stockroom_config::{AppConfig, CacheBackend, DatabaseConfig, RedisConfig, StoreBackend};
use stockroom_core::{HealthStatus, StockroomError, StockroomResult};
use stockroom_repository::{
    create_pool, DatabasePool, InMemoryProductRepository, MySqlProductRepository,
    ProductRepository,
};
use stockroom_rest::AppState;
use stockroom_service::{
    create_redis_pool, CacheInterface, InMemoryCache, ProductService, ProductServiceImpl,
    RedisCacheService,
};
use tracing::{info, warn};

/// The application's component graph.
pub struct AppModule {
    repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
    product_service: Arc<dyn ProductService>,
    db_pool: Option<Arc<DatabasePool>>,
    redis_pool: Option<Arc<Pool>>,
}

impl AppModule {
    /// Builds every component for the given configuration.
    ///
    /// Fails if the database is unreachable, migrations fail, or the Redis
    /// backend is enabled and does not answer a PING.
    pub async fn build(config: &AppConfig) -> StockroomResult<Self> {
        let (repository, db_pool) = build_repository(&config.database).await?;
        let (cache, redis_pool) = build_cache(&config.redis).await?;

        let mut module = Self::from_parts(repository, cache, config.cache.ttl());
        module.db_pool = db_pool;
        module.redis_pool = redis_pool;
        Ok(module)
    }

    /// Wires a module from already-built store and cache handles.
    pub fn from_parts(
        repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
        ttl: Duration,
    ) -> Self {
        let product_service: Arc<dyn ProductService> = Arc::new(ProductServiceImpl::with_ttl(
            repository.clone(),
            cache.clone(),
            ttl,
        ));

        Self {
            repository,
            cache,
            product_service,
            db_pool: None,
            redis_pool: None,
        }
    }

    pub fn repository(&self) -> Arc<dyn ProductRepository> {
        self.repository.clone()
    }

    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        self.cache.clone()
    }

    pub fn product_service(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    /// Handler state sharing this module's components.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.product_service(), self.repository(), self.cache())
    }

    /// Closes the connection pools this module owns.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.redis_pool {
            pool.close();
            info!("Redis connection pool closed");
        }
        if let Some(pool) = &self.db_pool {
            pool.close().await;
        }
    }
}

async fn build_repository(
    config: &DatabaseConfig,
) -> StockroomResult<(Arc<dyn ProductRepository>, Option<Arc<DatabasePool>>)> {
    match config.backend {
        StoreBackend::MySql => {
            let pool = create_pool(config).await?;
            let repository: Arc<dyn ProductRepository> =
                Arc::new(MySqlProductRepository::new(pool.clone()));
            Ok((repository, Some(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory product store; data is lost on exit");
            Ok((Arc::new(InMemoryProductRepository::new()), None))
        }
    }
}

async fn build_cache(
    config: &RedisConfig,
) -> StockroomResult<(Arc<dyn CacheInterface>, Option<Arc<Pool>>)> {
    if !config.enabled {
        info!("Cache disabled; every read goes to the store");
        return Ok((Arc::new(RedisCacheService::disabled()), None));
    }

    match config.backend {
        CacheBackend::Redis => {
            let pool = create_redis_pool(config)?;
            let cache = RedisCacheService::new(pool.clone());
            match cache.health_check().await {
                HealthStatus::Unhealthy(reason) => Err(StockroomError::cache(format!(
                    "Redis at {} is unreachable: {}",
                    config.url, reason
                ))),
                _ => {
                    info!("Connected to Redis");
                    Ok((Arc::new(cache), Some(pool)))
                }
            }
        }
        CacheBackend::Memory => Ok((Arc::new(InMemoryCache::new()), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_service::ProductRequest;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.redis.backend = CacheBackend::Memory;
        config
    }

    #[tokio::test]
    async fn test_build_memory_module() {
        let module = AppModule::build(&memory_config()).await.unwrap();

        assert!(module.repository().health_check().await.is_healthy());
        assert!(module.cache().is_enabled());
        assert!(module.db_pool.is_none());
        assert!(module.redis_pool.is_none());
        module.shutdown().await;
    }

    #[tokio::test]
    async fn test_disabled_cache_overrides_backend() {
        let mut config = memory_config();
        config.redis.enabled = false;
        config.redis.backend = CacheBackend::Redis;

        let module = AppModule::build(&config).await.unwrap();
        assert!(!module.cache().is_enabled());
        assert_eq!(module.cache().health_check().await, HealthStatus::Disabled);
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_fatal() {
        let mut config = memory_config();
        config.redis.backend = CacheBackend::Redis;
        config.redis.url = "redis://127.0.0.1:1/0".to_string();
        config.redis.wait_timeout_secs = 1;

        let err = AppModule::build(&config).await.err().unwrap();
        assert!(matches!(err, StockroomError::Cache(_)));
    }

    #[tokio::test]
    async fn test_components_are_shared() {
        let module = AppModule::build(&memory_config()).await.unwrap();
        let service = module.product_service();

        let created = service
            .create_product(ProductRequest::new("Widget", 9.99))
            .await
            .unwrap();
        let stored = module.repository().find_by_id(created.id).await.unwrap();
        assert_eq!(stored.unwrap().name, "Widget");

        let state = module.app_state();
        assert_eq!(state.product_service.list_products().await.unwrap().len(), 1);
    }
}
