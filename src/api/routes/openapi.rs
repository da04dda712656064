//! OpenAPI specification endpoint.

use axum::{Router, extract::State, response::Json, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;

use super::super::openapi::ApiDoc;
use super::app_state::AppState;
use crate::config::Settings;

/// Create the OpenAPI router
pub fn openapi_router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi_json))
}

/// GET /openapi.json - Serve the OpenAPI specification as JSON
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "OpenAPI",
    responses(
        (status = 200, description = "OpenAPI specification", body = Object)
    )
)]
pub async fn serve_openapi_json(
    State(settings): State<Arc<Settings>>,
) -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.info.title = settings.app_name.clone();
    Json(doc)
}
