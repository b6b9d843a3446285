//! Cache key generators for consistent key naming.

use stockroom_core::ProductId;

/// Cache key for a product: `product:{id}` with the id in plain decimal.
#[must_use]
pub fn product_by_id(id: ProductId) -> String {
    format!("product:{}", id)
}
