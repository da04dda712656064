//! Request context middleware.
//!
//! Assigns every request a correlation id, times it, and emits one structured
//! log line when it completes. The id is taken from the incoming
//! `x-request-id` header when present, otherwise a UUID v4 is generated, and
//! it is always echoed back on the response.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

/// Header carrying the correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resolve the request id from the incoming headers, generating one if absent.
///
/// A non-empty header value is used exactly as sent.
pub fn resolve_request_id(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Request logging middleware, mounted with `axum::middleware::from_fn`.
///
/// Server errors (including panics turned into 500s by the inner catch-panic
/// layer) are logged as `request_failed` at ERROR level, everything else as
/// `request_complete` at INFO level.
pub async fn request_context(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = Instant::now();
    let mut response = next.run(request).instrument(span).await;
    let duration_ms = start.elapsed().as_millis() as u64;
    let status_code = response.status().as_u16();

    if response.status().is_server_error() {
        error!(
            target: "api.request",
            request_id = %request_id,
            method = %method,
            path = %path,
            status_code,
            duration_ms,
            "request_failed"
        );
    } else {
        info!(
            target: "api.request",
            request_id = %request_id,
            method = %method,
            path = %path,
            status_code,
            duration_ms,
            "request_complete"
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}
