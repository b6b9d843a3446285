//! Integration tests for MySqlProductRepository.
//!
//! These run against a real MySQL server started with testcontainers and
//! need a Docker daemon.

mod common;

use common::TestDatabase;
use stockroom_core::ProductId;
use stockroom_repository::{MySqlProductRepository, ProductRepository};

#[tokio::test]
async fn test_insert_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = MySqlProductRepository::new(db.pool());

    let id = repo.insert("Widget", 9.99).await.expect("insert failed");

    let found = repo
        .find_by_id(id)
        .await
        .expect("query failed")
        .expect("product not found");
    assert_eq!(found.id, id);
    assert_eq!(found.name, "Widget");
    assert!((found.price - 9.99).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = MySqlProductRepository::new(db.pool());

    let found = repo.find_by_id(ProductId(424_242)).await.expect("query failed");
    assert!(found.is_none());
}

#[tokio::test]
async fn test_price_is_stored_with_two_decimals() {
    let db = TestDatabase::new().await;
    let repo = MySqlProductRepository::new(db.pool());

    let id = repo.insert("Rounded", 1.005).await.expect("insert failed");
    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert!((found.price * 100.0 - (found.price * 100.0).round()).abs() < 1e-9);
}

#[tokio::test]
async fn test_update_and_delete() {
    let db = TestDatabase::new().await;
    let repo = MySqlProductRepository::new(db.pool());

    let id = repo.insert("Widget", 9.99).await.unwrap();

    assert_eq!(repo.update(id, "Widget Pro", 12.5).await.unwrap(), 1);
    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.name, "Widget Pro");
    assert!((found.price - 12.5).abs() < f64::EPSILON);

    assert_eq!(repo.delete(id).await.unwrap(), 1);
    assert!(repo.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_and_delete_missing_id_affect_nothing() {
    let db = TestDatabase::new().await;
    let repo = MySqlProductRepository::new(db.pool());

    assert_eq!(repo.update(ProductId(999), "Ghost", 1.0).await.unwrap(), 0);
    assert_eq!(repo.delete(ProductId(999)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_all_in_id_order() {
    let db = TestDatabase::new().await;
    let repo = MySqlProductRepository::new(db.pool());

    assert!(repo.find_all().await.unwrap().is_empty());

    let a = repo.insert("A", 1.0).await.unwrap();
    let b = repo.insert("B", 2.0).await.unwrap();

    let all = repo.find_all().await.unwrap();
    let ids: Vec<ProductId> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[tokio::test]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    let repo = MySqlProductRepository::new(db.pool());

    assert!(repo.health_check().await.is_healthy());

    db.pool().close().await;
    assert!(repo.health_check().await.is_unhealthy());
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = TestDatabase::new().await;
    db.pool().run_migrations().await.expect("second run failed");
}
