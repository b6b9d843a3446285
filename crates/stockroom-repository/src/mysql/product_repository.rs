//! MySQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePool};
use async_trait::async_trait;
use sqlx::FromRow;
use std::sync::Arc;
use stockroom_core::{HealthStatus, Product, ProductId, StockroomResult};
use tracing::{debug, warn};

/// MySQL product repository implementation.
#[derive(Clone)]
pub struct MySqlProductRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlProductRepository {
    /// Creates a new MySQL product repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
///
/// `price` is stored as DECIMAL(10,2) and read back through
/// `CAST(price AS DOUBLE)`.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::new(ProductId(row.id), row.name, row.price)
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn insert(&self, name: &str, price: f64) -> StockroomResult<ProductId> {
        debug!("Inserting product: {}", name);

        let result = sqlx::query("INSERT INTO products (name, price) VALUES (?, ?)")
            .bind(name)
            .bind(price)
            .execute(self.pool.inner())
            .await?;

        let id = i64::try_from(result.last_insert_id()).map_err(|_| {
            stockroom_core::StockroomError::Database(format!(
                "Generated id {} out of range",
                result.last_insert_id()
            ))
        })?;

        Ok(ProductId(id))
    }

    async fn find_by_id(&self, id: ProductId) -> StockroomResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, CAST(price AS DOUBLE) AS price
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn update(&self, id: ProductId, name: &str, price: f64) -> StockroomResult<u64> {
        debug!("Updating product: {}", id);

        let result = sqlx::query("UPDATE products SET name = ?, price = ? WHERE id = ?")
            .bind(name)
            .bind(price)
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: ProductId) -> StockroomResult<u64> {
        debug!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_all(&self) -> StockroomResult<Vec<Product>> {
        debug!("Listing all products");

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, CAST(price AS DOUBLE) AS price
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn health_check(&self) -> HealthStatus {
        match self.pool.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                HealthStatus::Unhealthy(e.to_string())
            }
        }
    }
}
