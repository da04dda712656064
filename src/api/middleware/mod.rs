// Middleware module - request context, logging and CORS

pub mod cors;
pub mod logging;
pub mod request_context;

// Re-export for convenience
pub use cors::{create_cors_layer, create_custom_cors_layer};
pub use logging::{init_logging, resolve_env_filter};
pub use request_context::{REQUEST_ID_HEADER, request_context, resolve_request_id};
