//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{DependencyChecks, HealthResponse, ReadinessResponse};
use stockroom_core::{ErrorResponse, FieldError};
use stockroom_service::{ProductRequest, ProductResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Stockroom API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "1.0.0",
        description = "Product catalogue with a Redis read cache in front of MySQL",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            ProductRequest,
            ProductResponse,
            HealthResponse,
            ReadinessResponse,
            DependencyChecks,
        )
    ),
    tags(
        (name = "products", description = "Product management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_product_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/products"));
        assert!(doc.paths.paths.contains_key("/products/{id}"));
        assert!(doc.paths.paths.contains_key("/ready"));
    }
}
