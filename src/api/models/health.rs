use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Deployment environment (local|dev|staging|prod)
    pub env: String,
}

impl HealthResponse {
    pub fn ok(env: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            env: env.into(),
        }
    }
}
