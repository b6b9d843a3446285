//! # Stockroom Core
//!
//! Core types, traits, and error definitions for the Stockroom product
//! service. Every other crate in the workspace builds on these.

pub mod error;
pub mod health;
pub mod id;
pub mod product;
pub mod result;
pub mod validation;

pub use error::*;
pub use health::*;
pub use id::*;
pub use product::*;
pub use result::*;
pub use validation::*;

// Re-export shaku so component traits share one `Interface` bound
pub use shaku::Interface;
