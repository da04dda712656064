//! OpenAPI specification definition.
//!
//! Aggregates all route handlers and schemas for OpenAPI documentation generation.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        crate::routes::health::health,
        crate::routes::health::list_routes,
        // OpenSearch
        crate::routes::search::ping,
        crate::routes::search::search,
        // LLM
        crate::routes::llm::generate,
        // OpenAPI
        crate::routes::openapi::serve_openapi_json,
    ),
    components(schemas(
        crate::models::HealthResponse,
        crate::models::PingResponse,
        crate::models::SearchResult,
        crate::models::SearchResponse,
        crate::models::GenerateRequest,
        crate::models::GenerateResponse,
    )),
    tags(
        (name = "Health", description = "Liveness and route listing"),
        (name = "OpenSearch", description = "Document search over the OpenSearch index"),
        (name = "LLM", description = "Text generation through AWS Bedrock"),
        (name = "OpenAPI", description = "OpenAPI specification"),
    ),
    info(
        title = "LexGuard API",
        description = "Gateway over the LexGuard document index and LLM endpoint",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
