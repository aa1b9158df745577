use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps request parsing failures and store failures to HTTP status codes
/// and formats them as JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// Path or query id could not be read as an integer
    InvalidId(String),
    /// Request body is not a valid Todo document
    InvalidBody(String),
    /// No Todo with this id
    NotFound(i64),
    /// Backing store unreachable or timed out
    StoreUnavailable(String),
    /// Backing store holds a record that cannot be decoded
    StoreCorrupt(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidId(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid id: {}", id),
            ),
            ApiError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", msg),
            ),
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Todo not found: {}", id),
            ),
            ApiError::StoreUnavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Store unavailable: {}", msg),
                )
            }
            ApiError::StoreCorrupt(msg) => {
                tracing::error!("Corrupt record in store: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Store error: {}", msg),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ApiError::StoreUnavailable(msg),
            other @ (StoreError::Corrupt { .. } | StoreError::Encode(_)) => {
                ApiError::StoreCorrupt(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidId(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidId(rejection.body_text())
    }
}

/// Parse a path or query id
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidId(format!("expected an integer, got '{}'", raw)))
}
