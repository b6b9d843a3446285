//! Caching infrastructure for the service layer.
//!
//! A cache abstraction with a Redis implementation and a process-local one.
//! The product service uses it for cache-aside reads of single products.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::InMemoryCache;
pub use redis_cache::{create_redis_pool, RedisCacheService};
