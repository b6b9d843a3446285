//! # Stockroom Repository
//!
//! Primary product store.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>
//! MySqlProductRepository | InMemoryProductRepository
//!   ↓
//! MySQL (DatabasePool)
//! ```

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::InMemoryProductRepository;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
