//! Process-local product store.
//!
//! Used by the `memory` store backend and as a fake in tests. Ids start at 1
//! and grow by one per insert, so listing order equals insertion order.

use crate::traits::ProductRepository;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use stockroom_core::{HealthStatus, Product, ProductId, StockroomError, StockroomResult};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    products: BTreeMap<ProductId, Product>,
}

/// In-memory product repository.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Inner>,
    unavailable: AtomicBool,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a database error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StockroomResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StockroomError::Database(
                "in-memory store marked unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, name: &str, price: f64) -> StockroomResult<ProductId> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = ProductId(inner.last_id);
        inner.products.insert(id, Product::new(id, name, price));
        debug!("Inserted product {} in memory", id);
        Ok(id)
    }

    async fn find_by_id(&self, id: ProductId) -> StockroomResult<Option<Product>> {
        self.check_available()?;
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn update(&self, id: ProductId, name: &str, price: f64) -> StockroomResult<u64> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        match inner.products.get_mut(&id) {
            Some(product) => {
                product.name = name.to_string();
                product.price = price;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: ProductId) -> StockroomResult<u64> {
        self.check_available()?;
        let removed = self.inner.write().await.products.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn find_all(&self) -> StockroomResult<Vec<Product>> {
        self.check_available()?;
        Ok(self.inner.read().await.products.values().cloned().collect())
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
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.insert("Widget", 9.99).await.unwrap();
        let second = repo.insert("Gadget", 5.0).await.unwrap();

        assert_eq!(first, ProductId(1));
        assert_eq!(second, ProductId(2));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = InMemoryProductRepository::new();
        let id = repo.insert("Widget", 9.99).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found, Product::new(id, "Widget", 9.99));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.find_by_id(ProductId(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_existing() {
        let repo = InMemoryProductRepository::new();
        let id = repo.insert("Widget", 9.99).await.unwrap();

        assert_eq!(repo.update(id, "Widget Pro", 12.5).await.unwrap(), 1);

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name, "Widget Pro");
        assert_eq!(found.price, 12.5);
    }

    #[tokio::test]
    async fn test_update_missing_affects_nothing() {
        let repo = InMemoryProductRepository::new();
        assert_eq!(repo.update(ProductId(999), "Ghost", 1.0).await.unwrap(), 0);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryProductRepository::new();
        let id = repo.insert("Widget", 9.99).await.unwrap();

        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert_eq!(repo.delete(id).await.unwrap(), 0);
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();
        let first = repo.insert("Widget", 9.99).await.unwrap();
        repo.delete(first).await.unwrap();

        let second = repo.insert("Gadget", 5.0).await.unwrap();
        assert_eq!(second, ProductId(2));
    }

    #[tokio::test]
    async fn test_find_all_in_insertion_order() {
        let repo = InMemoryProductRepository::new();
        repo.insert("A", 1.0).await.unwrap();
        repo.insert("B", 2.0).await.unwrap();
        repo.insert("C", 3.0).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_with_database_error() {
        let repo = InMemoryProductRepository::new();
        repo.set_unavailable(true);

        let err = repo.insert("Widget", 9.99).await.unwrap_err();
        assert!(matches!(err, StockroomError::Database(_)));
        assert!(repo.find_all().await.is_err());
        assert!(repo.health_check().await.is_unhealthy());

        repo.set_unavailable(false);
        assert!(repo.health_check().await.is_healthy());
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
