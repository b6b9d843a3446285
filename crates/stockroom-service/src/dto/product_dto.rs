//! Product DTOs.

use serde::{Deserialize, Serialize};
use stockroom_core::{Product, ProductId, StockroomError, StockroomResult, ValidateExt};
use utoipa::ToSchema;
use validator::Validate;

/// Body of a create or update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[schema(example = "Widget")]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    #[schema(example = 9.99)]
    pub price: f64,
}

impl ProductRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Runs the derived rules plus the checks they cannot express.
    pub fn check(&self) -> StockroomResult<()> {
        self.validate_request()?;
        if self.name.trim().is_empty() {
            return Err(StockroomError::validation("name: Name must not be blank"));
        }
        if !self.price.is_finite() {
            return Err(StockroomError::validation("price: Price must be a finite number"));
        }
        Ok(())
    }
}

/// Product as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(value_type = i64, example = 1)]
    pub id: ProductId,
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = 9.99)]
    pub price: f64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        assert!(ProductRequest::new("Widget", 9.99).check().is_ok());
        assert!(ProductRequest::new("Freebie", 0.0).check().is_ok());
    }

    #[test]
    fn test_empty_and_blank_names_rejected() {
        assert!(matches!(
            ProductRequest::new("", 1.0).check(),
            Err(StockroomError::Validation(_))
        ));
        assert!(matches!(
            ProductRequest::new("   ", 1.0).check(),
            Err(StockroomError::Validation(_))
        ));
    }

    #[test]
    fn test_long_name_rejected() {
        let name = "x".repeat(256);
        assert!(ProductRequest::new(name, 1.0).check().is_err());
        assert!(ProductRequest::new("x".repeat(255), 1.0).check().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = ProductRequest::new("Widget", -0.01).check().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: price: Price must not be negative");
    }

    #[test]
    fn test_missing_field_fails_to_decode() {
        assert!(serde_json::from_str::<ProductRequest>(r#"{"name":"Widget"}"#).is_err());
        assert!(serde_json::from_str::<ProductRequest>(r#"{"name":"Widget","price":"cheap"}"#).is_err());
    }

    #[test]
    fn test_response_from_product() {
        let response = ProductResponse::from(Product::new(ProductId(3), "Gadget", 4.5));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "Gadget", "price": 4.5}));
    }
}
