//! Integration tests for the /llm routes.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use lexguard_api::config::Settings;
use lexguard_api::routes::{AppState, create_router};
use lexguard_api::services::{
    LlmConfig, LlmError, LlmService, ModelInvoker, SearchBackend, SearchError,
};
use serde_json::{Value, json};
use std::sync::Arc;

struct NoSearch;

#[async_trait]
impl SearchBackend for NoSearch {
    async fn info(&self) -> Result<Value, SearchError> {
        Ok(json!({}))
    }

    async fn search(&self, _index: &str, _body: &Value) -> Result<Value, SearchError> {
        Ok(json!({"hits": {"hits": []}}))
    }
}

/// Invoker that answers like Claude on Bedrock, echoing the prompt.
struct EchoInvoker;

#[async_trait]
impl ModelInvoker for EchoInvoker {
    async fn invoke_model(&self, _model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, LlmError> {
        let request: Value = serde_json::from_slice(&body)?;
        let prompt = request["messages"][0]["content"][0]["text"]
            .as_str()
            .unwrap_or_default();
        let response = json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": format!("echo: {}", prompt)}]
        });
        Ok(serde_json::to_vec(&response)?)
    }
}

struct BrokenInvoker;

#[async_trait]
impl ModelInvoker for BrokenInvoker {
    async fn invoke_model(&self, _model_id: &str, _body: Vec<u8>) -> Result<Vec<u8>, LlmError> {
        Err(LlmError::Invocation("ThrottlingException".to_string()))
    }
}

fn create_test_server(llm: LlmService) -> TestServer {
    let app_state = AppState::new(Settings::default(), Arc::new(NoSearch), llm);
    TestServer::new(create_router(app_state)).unwrap()
}

fn enabled_service(invoker: Arc<dyn ModelInvoker>) -> LlmService {
    let settings = Settings {
        bedrock_enabled: true,
        bedrock_model_id: "anthropic.claude-3-sonnet-20240229-v1:0".to_string(),
        ..Settings::default()
    };
    LlmService::new(LlmConfig::from(&settings), Some(invoker))
}

#[tokio::test]
async fn test_generate_returns_stub_when_disabled() {
    let server = create_test_server(LlmService::disabled(&Settings::default()));

    let response = server
        .post("/llm/generate")
        .json(&json!({"prompt": "Can my employer change my hours?"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "model_id": "anthropic.claude-3-haiku-20240307-v1:0",
            "bedrock_enabled": false,
            "text": "[STUBBED BEDROCK RESPONSE] You said: Can my employer change my hours?"
        })
    );
}

#[tokio::test]
async fn test_generate_calls_model_when_enabled() {
    let server = create_test_server(enabled_service(Arc::new(EchoInvoker)));

    let response = server
        .post("/llm/generate")
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["model_id"], "anthropic.claude-3-sonnet-20240229-v1:0");
    assert_eq!(body["bedrock_enabled"], true);
    assert_eq!(body["text"], "echo: hello");
}

#[tokio::test]
async fn test_generate_model_failure_is_internal_error() {
    let server = create_test_server(enabled_service(Arc::new(BrokenInvoker)));

    let response = server
        .post("/llm/generate")
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_generate_rejects_empty_prompt() {
    let server = create_test_server(LlmService::disabled(&Settings::default()));

    let response = server
        .post("/llm/generate")
        .json(&json!({"prompt": ""}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["status"], 422);
}

#[tokio::test]
async fn test_generate_prompt_length_limit() {
    let server = create_test_server(LlmService::disabled(&Settings::default()));

    let at_limit = "a".repeat(8000);
    let response = server
        .post("/llm/generate")
        .json(&json!({"prompt": at_limit}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let too_long = "a".repeat(8001);
    let response = server
        .post("/llm/generate")
        .json(&json!({"prompt": too_long}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_generate_counts_characters_not_bytes() {
    let server = create_test_server(LlmService::disabled(&Settings::default()));

    // 8000 two-byte characters is within the limit
    let prompt = "é".repeat(8000);
    let response = server
        .post("/llm/generate")
        .json(&json!({"prompt": prompt}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_generate_rejects_missing_prompt() {
    let server = create_test_server(LlmService::disabled(&Settings::default()));

    let response = server
        .post("/llm/generate")
        .json(&json!({"text": "wrong field"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_generate_rejects_malformed_json() {
    let server = create_test_server(LlmService::disabled(&Settings::default()));

    let response = server
        .post("/llm/generate")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
