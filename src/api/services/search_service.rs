//! OpenSearch client over the REST API.
//!
//! Supports self-managed clusters (no auth or basic auth) and AWS managed
//! OpenSearch, where every request is signed with SigV4.

use async_trait::async_trait;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{
    PayloadChecksumKind, SignableBody, SignableRequest, SigningSettings, sign,
};
use aws_sigv4::sign::v4;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::{Duration, SystemTime};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::{OpenSearchAuthMode, Settings};
use crate::services::aws::load_aws_config;

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Retries after the first attempt, on timeouts and connection failures only.
pub const MAX_RETRIES: u32 = 3;

/// Search client errors.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Client could not be built from the settings
    #[error("OpenSearch configuration error: {0}")]
    Config(String),
    /// AWS credentials could not be resolved
    #[error("{0}")]
    Credentials(String),
    /// SigV4 signing failed
    #[error("Request signing failed: {0}")]
    Signing(String),
    /// Transport-level failure
    #[error("OpenSearch request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Cluster answered with a non-success status
    #[error("OpenSearch returned error {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body was not valid JSON
    #[error("Invalid OpenSearch response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Operations the gateway needs from the search cluster.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Cluster information (`GET /`).
    async fn info(&self) -> Result<Value, SearchError>;

    /// Run a search request body against `index`.
    async fn search(&self, index: &str, body: &Value) -> Result<Value, SearchError>;
}

/// Authentication applied to outgoing requests.
#[derive(Clone)]
pub enum SearchAuth {
    None,
    Basic {
        username: String,
        password: String,
    },
    SigV4 {
        credentials: SharedCredentialsProvider,
        region: String,
        service: String,
    },
}

impl std::fmt::Debug for SearchAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::SigV4 {
                region, service, ..
            } => f
                .debug_struct("SigV4")
                .field("region", region)
                .field("service", service)
                .finish_non_exhaustive(),
        }
    }
}

/// reqwest-backed OpenSearch client.
#[derive(Debug, Clone)]
pub struct OpenSearchClient {
    client: Client,
    base_url: Url,
    auth: SearchAuth,
}

impl OpenSearchClient {
    /// Create a client for `base_url` (e.g. `http://localhost:9200`).
    pub fn new(base_url: &str, auth: SearchAuth, verify_certs: bool) -> Result<Self, SearchError> {
        Self::with_timeout(base_url, auth, verify_certs, REQUEST_TIMEOUT)
    }

    /// Same as [`OpenSearchClient::new`] with a custom per-request timeout.
    pub fn with_timeout(
        base_url: &str,
        auth: SearchAuth,
        verify_certs: bool,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SearchError::Config(format!("invalid URL {}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_certs)
            .build()?;

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Build the client described by the OPENSEARCH_* settings.
    pub async fn from_settings(settings: &Settings) -> Result<Self, SearchError> {
        let mut url_settings = settings.clone();

        let auth = match settings.opensearch_auth_mode {
            OpenSearchAuthMode::None => SearchAuth::None,
            OpenSearchAuthMode::Basic => {
                match (&settings.opensearch_username, &settings.opensearch_password) {
                    (Some(username), Some(password)) => SearchAuth::Basic {
                        username: username.clone(),
                        password: password.clone(),
                    },
                    _ => {
                        return Err(SearchError::Config(
                            "Basic auth selected but OPENSEARCH_USERNAME/PASSWORD not set."
                                .to_string(),
                        ));
                    }
                }
            }
            OpenSearchAuthMode::SigV4 => {
                let sdk_config = load_aws_config(&settings.aws_region).await;
                let credentials = sdk_config.credentials_provider().ok_or_else(|| {
                    SearchError::Credentials(
                        "No AWS credentials found for SigV4 auth (check AWS_PROFILE/ENV/SSO)."
                            .to_string(),
                    )
                })?;
                // Managed clusters are only reachable over TLS
                url_settings.opensearch_use_ssl = true;
                SearchAuth::SigV4 {
                    credentials,
                    region: settings.aws_region.clone(),
                    service: settings.opensearch_aws_service.clone(),
                }
            }
        };

        debug!(
            "OpenSearch client for {} (auth={})",
            url_settings.opensearch_url(),
            settings.opensearch_auth_mode
        );

        Self::new(
            &url_settings.opensearch_url(),
            auth,
            settings.opensearch_verify_certs,
        )
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, SearchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| SearchError::Config(format!("invalid path {}: {}", path, e)))?;
        let payload = match body {
            Some(body) => serde_json::to_vec(body)?,
            None => Vec::new(),
        };

        let mut attempt = 0;
        let response = loop {
            match self.send_once(method.clone(), &url, &payload, body.is_some()).await {
                Ok(response) => break response,
                Err(SearchError::Transport(e))
                    if attempt < MAX_RETRIES && (e.is_timeout() || e.is_connect()) =>
                {
                    attempt += 1;
                    warn!(
                        "OpenSearch {} {} failed ({}), retry {}/{}",
                        method, url, e, attempt, MAX_RETRIES
                    );
                }
                Err(e) => return Err(e),
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_once(
        &self,
        method: Method,
        url: &Url,
        payload: &[u8],
        has_body: bool,
    ) -> Result<reqwest::Response, SearchError> {
        let mut headers = HeaderMap::new();
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut builder = self.client.request(method.clone(), url.clone());
        match &self.auth {
            SearchAuth::None => {}
            SearchAuth::Basic { username, password } => {
                builder = builder.basic_auth(username, Some(password));
            }
            SearchAuth::SigV4 {
                credentials,
                region,
                service,
            } => {
                let signed = sign_request(
                    credentials,
                    region,
                    service,
                    &method,
                    url,
                    &headers,
                    payload,
                )
                .await?;
                headers.extend(signed);
            }
        }

        let mut builder = builder.headers(headers);
        if has_body {
            builder = builder.body(payload.to_vec());
        }
        Ok(builder.send().await?)
    }
}

#[async_trait]
impl SearchBackend for OpenSearchClient {
    async fn info(&self) -> Result<Value, SearchError> {
        self.request(Method::GET, "/", None).await
    }

    async fn search(&self, index: &str, body: &Value) -> Result<Value, SearchError> {
        let path = format!("/{}/_search", index);
        self.request(Method::POST, &path, Some(body)).await
    }
}

/// Compute SigV4 headers for a request.
async fn sign_request(
    provider: &SharedCredentialsProvider,
    region: &str,
    service: &str,
    method: &Method,
    url: &Url,
    headers: &HeaderMap,
    payload: &[u8],
) -> Result<HeaderMap, SearchError> {
    let credentials = provider.provide_credentials().await.map_err(|e| {
        SearchError::Credentials(format!(
            "No AWS credentials found for SigV4 auth (check AWS_PROFILE/ENV/SSO): {}",
            e
        ))
    })?;
    let identity = credentials.into();

    let mut settings = SigningSettings::default();
    // OpenSearch Serverless rejects requests without a payload hash header
    if service == "aoss" {
        settings.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;
    }

    let params = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(service)
        .time(SystemTime::now())
        .settings(settings)
        .build()
        .map_err(|e| SearchError::Signing(e.to_string()))?
        .into();

    let header_pairs = headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)));
    let signable = SignableRequest::new(
        method.as_str(),
        url.as_str(),
        header_pairs,
        SignableBody::Bytes(payload),
    )
    .map_err(|e| SearchError::Signing(e.to_string()))?;

    let (instructions, _signature) = sign(signable, &params)
        .map_err(|e| SearchError::Signing(e.to_string()))?
        .into_parts();

    let mut signed = HeaderMap::new();
    for (name, value) in instructions.headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SearchError::Signing(e.to_string()))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| SearchError::Signing(e.to_string()))?;
        signed.insert(name, value);
    }
    Ok(signed)
}
