//! LLM text generation through AWS Bedrock Runtime.
//!
//! When Bedrock is disabled the service answers with a stub and never builds
//! an AWS client, so local runs cost nothing.

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Settings;
use crate::services::aws::load_aws_config;

/// Anthropic Messages API version understood by Bedrock.
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// LLM service errors.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Bedrock is enabled but no invoker is configured
    #[error("LLM client not initialized")]
    NotConfigured,
    /// The model invocation failed
    #[error("Bedrock invocation failed: {0}")]
    Invocation(String),
    /// The model returned something that is not JSON
    #[error("Invalid model response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Raw model invocation, one request body in, one response body out.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, LlmError>;
}

/// Bedrock Runtime `InvokeModel` backed invoker.
#[derive(Debug, Clone)]
pub struct BedrockInvoker {
    client: BedrockClient,
}

impl BedrockInvoker {
    pub fn new(client: BedrockClient) -> Self {
        Self { client }
    }

    /// Build a Bedrock Runtime client for `region` using the default credential chain.
    pub async fn for_region(region: &str) -> Self {
        let sdk_config = load_aws_config(region).await;
        let config = aws_sdk_bedrockruntime::config::Builder::from(&sdk_config)
            .region(Region::new(region.to_string()))
            .build();
        Self::new(BedrockClient::from_conf(config))
    }
}

#[async_trait]
impl ModelInvoker for BedrockInvoker {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, LlmError> {
        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .body(Blob::new(body))
            .accept("application/json")
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| LlmError::Invocation(DisplayErrorContext(&e).to_string()))?;

        Ok(output.body().as_ref().to_vec())
    }
}

/// Generation parameters taken from the BEDROCK_* settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub enabled: bool,
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl From<&Settings> for LlmConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            enabled: settings.bedrock_enabled,
            model_id: settings.bedrock_model_id.clone(),
            max_tokens: settings.bedrock_max_tokens,
            temperature: settings.bedrock_temperature,
        }
    }
}

/// Generated text plus the decoded model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub text: String,
    pub raw: Value,
}

/// Text generator used by the `/llm` routes.
#[derive(Clone)]
pub struct LlmService {
    config: LlmConfig,
    invoker: Option<Arc<dyn ModelInvoker>>,
}

impl LlmService {
    pub fn new(config: LlmConfig, invoker: Option<Arc<dyn ModelInvoker>>) -> Self {
        Self { config, invoker }
    }

    /// Service that only ever returns stub responses.
    pub fn disabled(settings: &Settings) -> Self {
        let mut config = LlmConfig::from(settings);
        config.enabled = false;
        Self::new(config, None)
    }

    /// Build the service from settings, creating a Bedrock client only when enabled.
    pub async fn from_settings(settings: &Settings) -> Self {
        let config = LlmConfig::from(settings);
        if !config.enabled {
            info!("Bedrock disabled, /llm/generate will return stubbed responses");
            return Self::new(config, None);
        }

        let region = settings.bedrock_region();
        info!(
            "Bedrock enabled (model={}, region={})",
            config.model_id, region
        );
        let invoker: Arc<dyn ModelInvoker> = Arc::new(BedrockInvoker::for_region(region).await);
        Self::new(config, Some(invoker))
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    pub fn model_id(&self) -> &str {
        &self.config.model_id
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Generate text for `prompt`, or a stub when Bedrock is disabled.
    pub async fn generate(&self, prompt: &str) -> Result<Generation, LlmError> {
        if !self.config.enabled {
            return Ok(stub_generation(prompt));
        }

        let invoker = self.invoker.as_ref().ok_or(LlmError::NotConfigured)?;
        let body = anthropic_request_body(prompt, self.config.max_tokens, self.config.temperature);
        let bytes = serde_json::to_vec(&body)?;

        debug!("Invoking model {}", self.config.model_id);
        let response = invoker.invoke_model(&self.config.model_id, bytes).await?;
        let raw: Value = serde_json::from_slice(&response)?;

        Ok(Generation {
            text: extract_text(&raw),
            raw,
        })
    }
}

/// Stub answer returned while Bedrock is disabled.
pub fn stub_generation(prompt: &str) -> Generation {
    Generation {
        text: format!("[STUBBED BEDROCK RESPONSE] You said: {}", prompt),
        raw: json!({ "stub": true, "bedrock_enabled": false }),
    }
}

/// Single-turn Anthropic Messages request body.
pub fn anthropic_request_body(prompt: &str, max_tokens: u32, temperature: f64) -> Value {
    json!({
        "anthropic_version": ANTHROPIC_VERSION,
        "max_tokens": max_tokens,
        "temperature": temperature,
        "messages": [
            {
                "role": "user",
                "content": [{ "type": "text", "text": prompt }]
            }
        ],
    })
}

/// Text of the first content block, or empty when absent.
pub fn extract_text(response: &Value) -> String {
    response
        .get("content")
        .and_then(|c| c.as_array())
        .and_then(|blocks| blocks.first())
        .and_then(|block| block.get("text"))
        .and_then(|t| t.as_str())
        .unwrap_or_default()
        .to_string()
}
