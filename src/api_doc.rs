use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::Todo;
use crate::service::ReadResult;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-redis-todos API",
        version = "1.0.0",
        description = "CRUD service for Todo items backed by Redis"
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::get::get_handler,
        handlers::post::post_handler,
        handlers::post::post_item_handler,
        handlers::put::put_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            Todo,
            ReadResult,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "todos", description = "Todo operations")
    )
)]
pub struct ApiDoc;
