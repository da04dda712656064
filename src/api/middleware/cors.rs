//! CORS middleware configuration.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::Settings;
use crate::middleware::request_context::REQUEST_ID_HEADER;

/// Create the CORS layer for the gateway.
///
/// Permissive when CORS_ALLOWED_ORIGINS is empty (local development),
/// otherwise limited to the listed origins.
pub fn create_cors_layer(settings: &Settings) -> CorsLayer {
    if settings.cors_allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    create_custom_cors_layer(&settings.cors_allowed_origins)
}

/// Create a CORS layer restricted to `allowed_origins`.
///
/// Origins that are not valid header values are skipped.
pub fn create_custom_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::any())
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}
