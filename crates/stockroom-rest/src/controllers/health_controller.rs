//! Health check controller.

use crate::state::AppState;
use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Per-dependency readiness.
#[derive(Debug, Serialize, ToSchema)]
pub struct DependencyChecks {
    /// Primary store: `up` or `down`.
    pub database: String,
    /// Cache: `up`, `down` or `disabled`.
    pub cache: String,
}

/// Readiness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready`, `degraded` (cache down) or `unavailable` (store down).
    pub status: String,
    pub checks: DependencyChecks,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint.
///
/// Only the store decides readiness. A failing cache is reported as
/// `degraded` since every request still succeeds through the store.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Primary store unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let (database, cache) = tokio::join!(state.repository.health_check(), state.cache.health_check());

    let (status_code, status) = if database.is_unhealthy() {
        warn!("Readiness check failed: primary store is down");
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    } else if cache.is_unhealthy() {
        (StatusCode::OK, "degraded")
    } else {
        (StatusCode::OK, "ready")
    };

    let body = ReadinessResponse {
        status: status.to_string(),
        checks: DependencyChecks {
            database: database.label().to_string(),
            cache: cache.label().to_string(),
        },
    };

    (status_code, Json(body))
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
