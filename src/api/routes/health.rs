//! Health and route listing endpoints.

use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::config::Settings;
use crate::models::HealthResponse;

/// GET /health - Liveness check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(State(settings): State<Arc<Settings>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(settings.env.clone()))
}

/// GET /_routes - Sorted list of the registered route paths
#[utoipa::path(
    get,
    path = "/_routes",
    tag = "Health",
    responses(
        (status = 200, description = "Registered paths", body = Vec<String>)
    )
)]
pub async fn list_routes() -> Json<Vec<&'static str>> {
    Json(super::route_paths())
}
