//! Product service trait definition.

use crate::dto::{ProductRequest, ProductResponse};
use async_trait::async_trait;
use stockroom_core::{Interface, ProductId, StockroomResult};

/// Product service trait.
///
/// Cache faults never escape this trait: callers only ever see
/// `Validation`, `NotFound` or `Database`.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Creates a product. The cache is left untouched.
    async fn create_product(&self, request: ProductRequest) -> StockroomResult<ProductResponse>;

    /// Gets a product, serving from cache when possible.
    async fn get_product(&self, id: ProductId) -> StockroomResult<ProductResponse>;

    /// Lists all products straight from the store.
    async fn list_products(&self) -> StockroomResult<Vec<ProductResponse>>;

    /// Overwrites a product and invalidates its cache entry.
    async fn update_product(
        &self,
        id: ProductId,
        request: ProductRequest,
    ) -> StockroomResult<ProductResponse>;

    /// Deletes a product and invalidates its cache entry.
    async fn delete_product(&self, id: ProductId) -> StockroomResult<()>;
}
