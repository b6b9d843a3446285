//! Storage backend selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend for the primary product store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// MySQL through an SQLx connection pool.
    #[default]
    MySql,
    /// Process-local store, for development and tests.
    Memory,
}

impl StoreBackend {
    /// Returns true if the backend talks to an external database.
    #[must_use]
    pub const fn is_networked(&self) -> bool {
        matches!(self, Self::MySql)
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MySql => write!(f, "mysql"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Backend for the product cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Redis through a deadpool connection pool.
    #[default]
    Redis,
    /// Process-local cache, for development and tests.
    Memory,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
        }
    }
}
