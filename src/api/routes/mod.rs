//! API routes module - organizes all route handlers.
//!
//! Search routes live under /os, LLM routes under /llm.

pub mod app_state;
pub mod error;
pub mod health;
pub mod llm;
pub mod openapi;
pub mod search;

use axum::{Router, middleware::from_fn, routing::get};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

pub use app_state::AppState;
pub use error::ApiError;

use crate::middleware::{create_cors_layer, request_context};

/// Every path registered by [`create_router`].
const ROUTE_PATHS: [&str; 6] = [
    "/health",
    "/_routes",
    "/os/ping",
    "/os/search",
    "/llm/generate",
    "/openapi.json",
];

/// Registered route paths, sorted.
pub fn route_paths() -> Vec<&'static str> {
    let mut paths = ROUTE_PATHS.to_vec();
    paths.sort_unstable();
    paths
}

/// Create the route tree without state or middleware.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/_routes", get(health::list_routes))
        .nest("/os", search::search_router())
        .nest("/llm", llm::llm_router())
        .merge(openapi::openapi_router())
}

/// Create the full application: routes, state and middleware.
///
/// Layer order, outermost first: CORS, request context, panic catcher.
pub fn create_router(app_state: AppState) -> Router {
    let cors = create_cors_layer(&app_state.settings);

    create_api_router().with_state(app_state).layer(
        ServiceBuilder::new()
            .layer(cors)
            .layer(from_fn(request_context))
            .layer(CatchPanicLayer::new()),
    )
}
