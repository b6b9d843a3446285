//! Application state for Axum handlers.

use std::sync::Arc;
use stockroom_repository::ProductRepository;
use stockroom_service::{CacheInterface, ProductService};

/// Shared application state.
///
/// The store and cache handles are the same ones the service holds. The
/// handlers only use them for health reporting.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub repository: Arc<dyn ProductRepository>,
    pub cache: Arc<dyn CacheInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        product_service: Arc<dyn ProductService>,
        repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            product_service,
            repository,
            cache,
        }
    }
}
