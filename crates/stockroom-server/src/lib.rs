//! # Stockroom Server Library
//!
//! Wiring and startup for the Stockroom product service: builds the store
//! and cache for the configured backends, hands them to the product service
//! and serves the REST router until shutdown.

pub mod app;
pub mod di;
pub mod startup;

pub use app::*;
pub use di::AppModule;
