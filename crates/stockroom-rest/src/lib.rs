//! # Stockroom REST
//!
//! HTTP surface of the product service: the `/products` resource, health
//! probes, Prometheus metrics and Swagger UI.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
