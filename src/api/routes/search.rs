//! OpenSearch routes.

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
    routing::get,
};
use tracing::debug;

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::{PingResponse, SearchQuery, SearchResponse};
use crate::retrieval::build_search_body;

/// Create the OpenSearch router
pub fn search_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/search", get(search))
}

/// GET /os/ping - Cluster name and version
#[utoipa::path(
    get,
    path = "/os/ping",
    tag = "OpenSearch",
    responses(
        (status = 200, description = "Cluster reachable", body = PingResponse),
        (status = 500, description = "Cluster unreachable or misconfigured")
    )
)]
pub async fn ping(State(state): State<AppState>) -> Result<Json<PingResponse>, ApiError> {
    let info = state.search.info().await?;
    Ok(Json(PingResponse::from_info(&info)))
}

/// GET /os/search - Free-text search over the document index
///
/// Assumes documents have `content`, `title` and `source` fields.
#[utoipa::path(
    get,
    path = "/os/search",
    tag = "OpenSearch",
    params(SearchQuery),
    responses(
        (status = 200, description = "Search hits", body = SearchResponse),
        (status = 422, description = "Invalid query parameters"),
        (status = 500, description = "Search failed")
    )
)]
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = query?;
    let (q, k) = params.validate().map_err(ApiError::validation)?;

    let body = build_search_body(&q, k, &params.filters());
    let index = &state.settings.opensearch_index;
    debug!("Searching index {} (k={})", index, k);

    let raw = state.search.search(index, &body).await?;
    Ok(Json(SearchResponse::from_raw(q, k, &raw)))
}
