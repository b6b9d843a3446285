//! # Stockroom Service
//!
//! Product use cases on top of the primary store, with a cache-aside layer
//! in front of single-product reads.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod metrics;
pub mod product_service;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::{ProductServiceImpl, DEFAULT_TTL};
