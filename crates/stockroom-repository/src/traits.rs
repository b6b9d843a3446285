//! Repository trait definitions.

use async_trait::async_trait;
use stockroom_core::{HealthStatus, Interface, Product, ProductId, StockroomResult};

/// Product store.
///
/// The store is the single source of truth. Implementations report every
/// failure as [`stockroom_core::StockroomError::Database`].
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Inserts a new product and returns the id the store assigned to it.
    async fn insert(&self, name: &str, price: f64) -> StockroomResult<ProductId>;

    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> StockroomResult<Option<Product>>;

    /// Overwrites name and price of a product.
    ///
    /// Returns the number of rows the store reports as affected. Zero usually
    /// means the id does not exist, which is not an error.
    async fn update(&self, id: ProductId, name: &str, price: f64) -> StockroomResult<u64>;

    /// Deletes a product by ID. Returns the number of rows removed.
    async fn delete(&self, id: ProductId) -> StockroomResult<u64>;

    /// Returns every product in store order.
    async fn find_all(&self) -> StockroomResult<Vec<Product>>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> HealthStatus;
}
