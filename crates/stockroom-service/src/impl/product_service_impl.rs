//! Product service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{ProductRequest, ProductResponse};
use crate::metrics::CacheMetrics;
use crate::product_service::ProductService;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use stockroom_core::{Product, ProductId, StockroomError, StockroomResult};
use stockroom_repository::ProductRepository;
use tracing::{debug, info, warn};

/// Default lifetime of a cached product (one hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Cache-aside product service.
///
/// Reads go cache first and populate the cache on a miss. Writes go to the
/// store and then drop the cached entry. Any cache fault degrades to the
/// store path.
pub struct ProductServiceImpl {
    repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl ProductServiceImpl {
    /// Creates a new product service with the default TTL.
    pub fn new(repository: Arc<dyn ProductRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self::with_ttl(repository, cache, DEFAULT_TTL)
    }

    /// Creates a new product service with a custom cache TTL.
    pub fn with_ttl(
        repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
        ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    async fn read_cached(&self, key: &str) -> Option<Product> {
        match self.cache.get::<Product>(key).await {
            Ok(Some(product)) => {
                CacheMetrics::hit();
                debug!("Cache hit for key '{}'", key);
                Some(product)
            }
            Ok(None) => {
                CacheMetrics::miss();
                debug!("Cache miss for key '{}', fetching from store", key);
                None
            }
            Err(e @ StockroomError::Serialization(_)) => {
                CacheMetrics::error("decode");
                warn!("Discarding undecodable cache entry '{}': {}", key, e);
                None
            }
            Err(e) => {
                CacheMetrics::error("get");
                warn!("Cache read failed for key '{}', falling back to store: {}", key, e);
                None
            }
        }
    }

    async fn invalidate(&self, id: ProductId) {
        let key = cache_keys::product_by_id(id);
        match self.cache.delete(&key).await {
            Ok(removed) => debug!("Invalidated cache key '{}' (present: {})", key, removed),
            Err(e) => {
                CacheMetrics::error("delete");
                warn!("Failed to invalidate cache key '{}': {}", key, e);
            }
        }
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl")
            .field("cache_enabled", &self.cache.is_enabled())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn create_product(&self, request: ProductRequest) -> StockroomResult<ProductResponse> {
        debug!("Creating product: {}", request.name);

        request.check()?;

        let id = self.repository.insert(&request.name, request.price).await?;

        info!("Product created: {}", id);
        Ok(ProductResponse::from(Product::new(
            id,
            request.name,
            request.price,
        )))
    }

    async fn get_product(&self, id: ProductId) -> StockroomResult<ProductResponse> {
        let key = cache_keys::product_by_id(id);

        if let Some(product) = self.read_cached(&key).await {
            return Ok(ProductResponse::from(product));
        }

        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StockroomError::not_found("Product", id))?;

        if let Err(e) = self.cache.set(&key, &product, self.ttl).await {
            CacheMetrics::error("set");
            warn!("Failed to cache product {}: {}", id, e);
        }

        Ok(ProductResponse::from(product))
    }

    async fn list_products(&self) -> StockroomResult<Vec<ProductResponse>> {
        debug!("Listing products");

        let products = self.repository.find_all().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: ProductRequest,
    ) -> StockroomResult<ProductResponse> {
        debug!("Updating product: {}", id);

        request.check()?;

        let affected = self
            .repository
            .update(id, &request.name, request.price)
            .await?;
        if affected == 0 {
            debug!("Update of product {} matched no rows", id);
        }

        self.invalidate(id).await;

        info!("Product updated: {}", id);
        Ok(ProductResponse::from(Product::new(
            id,
            request.name,
            request.price,
        )))
    }

    async fn delete_product(&self, id: ProductId) -> StockroomResult<()> {
        debug!("Deleting product: {}", id);

        let affected = self.repository.delete(id).await?;
        if affected == 0 {
            debug!("Delete of product {} matched no rows", id);
        }

        self.invalidate(id).await;

        info!("Product deleted: {}", id);
        Ok(())
    }
}
