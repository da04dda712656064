//! Application state management.
//!
//! Holds the settings and the external clients, built once at startup and
//! shared by every handler.

use axum::extract::FromRef;
use std::sync::Arc;

use crate::config::Settings;
use crate::services::{LlmService, OpenSearchClient, SearchBackend, SearchError};

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Settings the process was started with
    pub settings: Arc<Settings>,
    /// Search cluster client
    pub search: Arc<dyn SearchBackend>,
    /// LLM generation service (stubbed when Bedrock is disabled)
    pub llm: Arc<LlmService>,
}

impl AppState {
    /// Create the state from already-built clients.
    pub fn new(settings: Settings, search: Arc<dyn SearchBackend>, llm: LlmService) -> Self {
        Self {
            settings: Arc::new(settings),
            search,
            llm: Arc::new(llm),
        }
    }

    /// Build the OpenSearch and Bedrock clients described by `settings`.
    pub async fn from_settings(settings: Settings) -> Result<Self, SearchError> {
        let search: Arc<dyn SearchBackend> =
            Arc::new(OpenSearchClient::from_settings(&settings).await?);
        let llm = LlmService::from_settings(&settings).await;
        Ok(Self::new(settings, search, llm))
    }
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.settings.clone()
    }
}

impl FromRef<AppState> for Arc<LlmService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.llm.clone()
    }
}
