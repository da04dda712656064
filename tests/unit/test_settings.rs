//! Unit tests for settings loading.

use lexguard_api::api::config::settings::parse_bool;
use lexguard_api::config::{ConfigError, OpenSearchAuthMode, Settings};
use lexguard_api::middleware::logging::{default_directives, level_directive};
use std::collections::HashMap;

fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let settings = settings_from(&[]).unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.app_name, "LexGuard AI");
    assert_eq!(settings.env, "local");
    assert_eq!(settings.port, 8000);
    assert_eq!(settings.opensearch_index, "lexguard-docs");
    assert_eq!(settings.opensearch_auth_mode, OpenSearchAuthMode::None);
    assert!(!settings.bedrock_enabled);
    assert_eq!(
        settings.bedrock_model_id,
        "anthropic.claude-3-haiku-20240307-v1:0"
    );
}

#[test]
fn test_overrides_are_applied() {
    let settings = settings_from(&[
        ("ENV", "prod"),
        ("OPENSEARCH_HOST", "search.internal"),
        ("OPENSEARCH_PORT", "443"),
        ("OPENSEARCH_USE_SSL", "true"),
        ("OPENSEARCH_AUTH_MODE", "SigV4"),
        ("BEDROCK_ENABLED", "yes"),
        ("BEDROCK_MAX_TOKENS", "1024"),
        ("BEDROCK_TEMPERATURE", "0.7"),
        ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
    ])
    .unwrap();

    assert_eq!(settings.env, "prod");
    assert_eq!(settings.opensearch_url(), "https://search.internal:443");
    assert_eq!(settings.opensearch_auth_mode, OpenSearchAuthMode::SigV4);
    assert!(settings.bedrock_enabled);
    assert_eq!(settings.bedrock_max_tokens, 1024);
    assert_eq!(settings.bedrock_temperature, 0.7);
    assert_eq!(
        settings.cors_allowed_origins,
        vec!["https://a.example".to_string(), "https://b.example".to_string()]
    );
}

#[test]
fn test_opensearch_url_uses_http_without_ssl() {
    let settings = settings_from(&[]).unwrap();
    assert_eq!(settings.opensearch_url(), "http://localhost:9200");
}

#[test]
fn test_bedrock_region_falls_back_to_aws_region() {
    let settings = settings_from(&[("AWS_REGION", "us-east-1")]).unwrap();
    assert_eq!(settings.bedrock_region(), "us-east-1");

    let settings =
        settings_from(&[("AWS_REGION", "us-east-1"), ("BEDROCK_REGION", "us-west-2")]).unwrap();
    assert_eq!(settings.bedrock_region(), "us-west-2");
}

#[test]
fn test_empty_optional_values_count_as_unset() {
    let settings = settings_from(&[("OPENSEARCH_USERNAME", ""), ("BEDROCK_REGION", "  ")]).unwrap();
    assert_eq!(settings.opensearch_username, None);
    assert_eq!(settings.bedrock_region, None);
}

#[test]
fn test_invalid_boolean_is_rejected() {
    let err = settings_from(&[("BEDROCK_ENABLED", "maybe")]).unwrap_err();
    match err {
        ConfigError::InvalidValue { key, value, .. } => {
            assert_eq!(key, "BEDROCK_ENABLED");
            assert_eq!(value, "maybe");
        }
    }
}

#[test]
fn test_invalid_port_is_rejected() {
    let err = settings_from(&[("OPENSEARCH_PORT", "not-a-port")]).unwrap_err();
    assert!(err.to_string().contains("OPENSEARCH_PORT"));
}

#[test]
fn test_invalid_auth_mode_is_rejected() {
    let err = settings_from(&[("OPENSEARCH_AUTH_MODE", "kerberos")]).unwrap_err();
    assert!(err.to_string().contains("OPENSEARCH_AUTH_MODE"));
}

#[test]
fn test_parse_bool_variants() {
    for value in ["1", "true", "TRUE", "yes", "on", "t", "y"] {
        assert_eq!(parse_bool(value), Some(true), "{value}");
    }
    for value in ["0", "false", "False", "no", "off", "f", "n"] {
        assert_eq!(parse_bool(value), Some(false), "{value}");
    }
    assert_eq!(parse_bool("2"), None);
}

#[test]
fn test_log_level_mapping() {
    assert_eq!(level_directive("WARNING"), "warn");
    assert_eq!(level_directive("critical"), "error");
    assert_eq!(level_directive("DEBUG"), "debug");
    assert_eq!(level_directive("chatty"), "info");

    let directives = default_directives("INFO");
    assert!(directives.starts_with("info,"));
    assert!(directives.contains("hyper=warn"));
    assert!(directives.contains("aws_config=warn"));
}
