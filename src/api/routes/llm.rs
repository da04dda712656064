//! LLM generation routes.

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    response::Json,
    routing::post,
};
use std::sync::Arc;

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::{GenerateRequest, GenerateResponse};
use crate::services::LlmService;

/// Create the LLM router
pub fn llm_router() -> Router<AppState> {
    Router::new().route("/generate", post(generate))
}

/// POST /llm/generate - Generate text for a prompt
///
/// Returns a stubbed answer while BEDROCK_ENABLED is false.
#[utoipa::path(
    post,
    path = "/llm/generate",
    tag = "LLM",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated text", body = GenerateResponse),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Model invocation failed")
    )
)]
pub async fn generate(
    State(llm): State<Arc<LlmService>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate().map_err(ApiError::validation)?;

    let generation = llm.generate(&request.prompt).await?;

    Ok(Json(GenerateResponse {
        model_id: llm.model_id().to_string(),
        bedrock_enabled: llm.is_enabled(),
        text: generation.text,
    }))
}
