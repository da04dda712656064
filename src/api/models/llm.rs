use serde::{Deserialize, Serialize};

/// Longest prompt accepted by `/llm/generate`, in characters.
pub const MAX_PROMPT_CHARS: usize = 8000;

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GenerateRequest {
    /// Between 1 and 8000 characters
    pub prompt: String,
}

impl GenerateRequest {
    /// Check the prompt length, returning a message describing the violation.
    pub fn validate(&self) -> Result<(), String> {
        let chars = self.prompt.chars().count();
        if chars == 0 {
            return Err("prompt: must contain at least 1 character".to_string());
        }
        if chars > MAX_PROMPT_CHARS {
            return Err(format!(
                "prompt: must contain at most {} characters (got {})",
                MAX_PROMPT_CHARS, chars
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GenerateResponse {
    pub model_id: String,
    pub bedrock_enabled: bool,
    pub text: String,
}
