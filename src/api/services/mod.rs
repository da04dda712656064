//! Services module - clients for the external search and LLM services.

pub mod aws;
pub mod llm_service;
pub mod search_service;

// Re-export for convenience
pub use llm_service::{BedrockInvoker, Generation, LlmConfig, LlmError, LlmService, ModelInvoker};
pub use search_service::{OpenSearchClient, SearchAuth, SearchBackend, SearchError};
