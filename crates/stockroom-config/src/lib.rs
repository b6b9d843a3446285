//! # Stockroom Config
//!
//! Configuration management for the Stockroom product service.
//! Supports layered configuration from files and environment variables.

mod app_config;
mod backend;
mod loader;
mod validation;

pub use app_config::*;
pub use backend::*;
pub use loader::*;
pub use validation::*;
