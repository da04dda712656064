// Models module - request and response DTOs for the gateway routes

pub mod health;
pub mod llm;
pub mod search;

pub use health::HealthResponse;
pub use llm::{GenerateRequest, GenerateResponse};
pub use search::{PingResponse, SearchQuery, SearchResponse, SearchResult};
