//! Unit tests for request id resolution and log filter selection.

use axum::body::Body;
use axum::extract::Request;
use lexguard_api::middleware::{resolve_env_filter, resolve_request_id};
use uuid::Uuid;

fn request_with_id(value: &str) -> Request {
    Request::builder()
        .uri("/health")
        .header("x-request-id", value)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn test_request_id_header_is_used_verbatim() {
    let request = request_with_id(" abc ");
    assert_eq!(resolve_request_id(&request), " abc ");
}

#[test]
fn test_empty_request_id_header_generates_uuid() {
    let request = request_with_id("");
    let request_id = resolve_request_id(&request);
    assert!(Uuid::parse_str(&request_id).is_ok());
}

#[test]
fn test_missing_request_id_header_generates_uuid() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let request_id = resolve_request_id(&request);
    assert!(Uuid::parse_str(&request_id).is_ok());
}

#[test]
fn test_valid_rust_log_is_used_without_warning() {
    let (filter, warning) = resolve_env_filter(Some("debug"), "INFO");
    assert!(warning.is_none());
    assert!(filter.to_string().contains("debug"));
}

#[test]
fn test_invalid_rust_log_falls_back_with_warning() {
    let (filter, warning) = resolve_env_filter(Some("app=loud"), "WARNING");
    let warning = warning.unwrap();
    assert!(warning.contains("app=loud"));
    assert!(filter.to_string().contains("hyper=warn"));
}

#[test]
fn test_unset_rust_log_uses_log_level_quietly() {
    let (filter, warning) = resolve_env_filter(None, "DEBUG");
    assert!(warning.is_none());
    let directives = filter.to_string();
    assert!(directives.contains("debug"));
    assert!(directives.contains("hyper=warn"));

    let (_, warning) = resolve_env_filter(Some("  "), "DEBUG");
    assert!(warning.is_none());
}
