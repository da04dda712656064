//! Application settings loaded from the environment.
//!
//! Every value has a default so the service boots locally with no
//! configuration at all. A `.env` file in the working directory is loaded
//! first (see [`Settings::from_env`]); real environment variables win over it.
//! Unknown variables are ignored.

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors raised while reading settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {key}: {value:?} (expected {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// How the gateway authenticates against the OpenSearch cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenSearchAuthMode {
    /// Local or unsecured cluster
    None,
    /// HTTP basic auth with OPENSEARCH_USERNAME/PASSWORD
    Basic,
    /// AWS managed OpenSearch, requests signed with SigV4
    SigV4,
}

impl FromStr for OpenSearchAuthMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "basic" => Ok(Self::Basic),
            "sigv4" => Ok(Self::SigV4),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OpenSearchAuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::SigV4 => "sigv4",
        };
        f.write_str(name)
    }
}

/// Gateway settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // App
    pub app_name: String,
    /// local|dev|staging|prod
    pub env: String,
    pub debug: bool,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_json: bool,
    pub cors_allowed_origins: Vec<String>,

    // AWS
    pub aws_region: String,

    // OpenSearch (local or managed)
    pub opensearch_host: String,
    pub opensearch_port: u16,
    pub opensearch_use_ssl: bool,
    pub opensearch_verify_certs: bool,
    pub opensearch_index: String,
    pub opensearch_auth_mode: OpenSearchAuthMode,
    pub opensearch_username: Option<String>,
    pub opensearch_password: Option<String>,
    pub opensearch_aws_service: String,

    // Document store
    pub s3_bucket: String,

    // Bedrock
    pub bedrock_enabled: bool,
    pub bedrock_region: Option<String>,
    pub bedrock_model_id: String,
    pub bedrock_max_tokens: u32,
    pub bedrock_temperature: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "LexGuard AI".to_string(),
            env: "local".to_string(),
            debug: true,
            host: "127.0.0.1".to_string(),
            port: 8000,
            log_level: "INFO".to_string(),
            log_json: false,
            cors_allowed_origins: Vec::new(),
            aws_region: "eu-west-1".to_string(),
            opensearch_host: "localhost".to_string(),
            opensearch_port: 9200,
            opensearch_use_ssl: false,
            opensearch_verify_certs: false,
            opensearch_index: "lexguard-docs".to_string(),
            opensearch_auth_mode: OpenSearchAuthMode::None,
            opensearch_username: None,
            opensearch_password: None,
            opensearch_aws_service: "es".to_string(),
            s3_bucket: "lexguard-docs-bucket".to_string(),
            bedrock_enabled: false,
            bedrock_region: None,
            bedrock_model_id: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            bedrock_max_tokens: 512,
            bedrock_temperature: 0.2,
        }
    }
}

impl Settings {
    /// Load settings from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is the normal case outside local development
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults; empty optional strings count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let reader = Reader { lookup: &lookup };

        let auth_mode = match reader.raw("OPENSEARCH_AUTH_MODE") {
            Some(value) => value
                .parse::<OpenSearchAuthMode>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "OPENSEARCH_AUTH_MODE",
                    value,
                    expected: "one of none, basic, sigv4",
                })?,
            None => defaults.opensearch_auth_mode,
        };

        Ok(Self {
            app_name: reader.string("APP_NAME", defaults.app_name),
            env: reader.string("ENV", defaults.env),
            debug: reader.boolean("DEBUG", defaults.debug)?,
            host: reader.string("HOST", defaults.host),
            port: reader.parsed("PORT", defaults.port, "a port number")?,
            log_level: reader.string("LOG_LEVEL", defaults.log_level),
            log_json: reader.boolean("LOG_JSON", defaults.log_json)?,
            cors_allowed_origins: reader
                .raw("CORS_ALLOWED_ORIGINS")
                .map(|value| {
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            aws_region: reader.string("AWS_REGION", defaults.aws_region),
            opensearch_host: reader.string("OPENSEARCH_HOST", defaults.opensearch_host),
            opensearch_port: reader.parsed(
                "OPENSEARCH_PORT",
                defaults.opensearch_port,
                "a port number",
            )?,
            opensearch_use_ssl: reader
                .boolean("OPENSEARCH_USE_SSL", defaults.opensearch_use_ssl)?,
            opensearch_verify_certs: reader
                .boolean("OPENSEARCH_VERIFY_CERTS", defaults.opensearch_verify_certs)?,
            opensearch_index: reader.string("OPENSEARCH_INDEX", defaults.opensearch_index),
            opensearch_auth_mode: auth_mode,
            opensearch_username: reader.raw("OPENSEARCH_USERNAME"),
            opensearch_password: reader.raw("OPENSEARCH_PASSWORD"),
            opensearch_aws_service: reader
                .string("OPENSEARCH_AWS_SERVICE", defaults.opensearch_aws_service),
            s3_bucket: reader.string("S3_BUCKET", defaults.s3_bucket),
            bedrock_enabled: reader.boolean("BEDROCK_ENABLED", defaults.bedrock_enabled)?,
            bedrock_region: reader.raw("BEDROCK_REGION"),
            bedrock_model_id: reader.string("BEDROCK_MODEL_ID", defaults.bedrock_model_id),
            bedrock_max_tokens: reader.parsed(
                "BEDROCK_MAX_TOKENS",
                defaults.bedrock_max_tokens,
                "a positive integer",
            )?,
            bedrock_temperature: reader.parsed(
                "BEDROCK_TEMPERATURE",
                defaults.bedrock_temperature,
                "a number",
            )?,
        })
    }

    /// Base URL of the OpenSearch cluster.
    pub fn opensearch_url(&self) -> String {
        let scheme = if self.opensearch_use_ssl { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.opensearch_host, self.opensearch_port)
    }

    /// Region used for Bedrock Runtime calls.
    pub fn bedrock_region(&self) -> &str {
        self.bedrock_region.as_deref().unwrap_or(&self.aws_region)
    }
}

struct Reader<'a, F> {
    lookup: &'a F,
}

impl<F> Reader<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn string(&self, key: &str, default: String) -> String {
        self.raw(key).unwrap_or(default)
    }

    fn boolean(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        let Some(value) = self.raw(key) else {
            return Ok(default);
        };
        parse_bool(&value).ok_or(ConfigError::InvalidValue {
            key,
            value,
            expected: "a boolean",
        })
    }

    fn parsed<T: FromStr>(
        &self,
        key: &'static str,
        default: T,
        expected: &'static str,
    ) -> Result<T, ConfigError> {
        match self.raw(key) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key,
                value,
                expected,
            }),
            None => Ok(default),
        }
    }
}

/// Parse a boolean flag (`1/true/yes/on/t/y` or `0/false/no/off/f/n`).
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "t" | "y" => Some(true),
        "0" | "false" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}
