use crate::error::{HealthResponse, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// GET /health handler - Health check endpoint
///
/// Pings the backing store. Returns 200 OK if it answers,
/// 503 Service Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.todos.health_check().await {
        Ok(()) => {
            tracing::debug!("Health check passed");
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Health check failed: {:?}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: "Cannot reach the backing store".to_string(),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{DownStore, app_with_store, body_json, send, test_app};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let app = test_app();

        let response = send(&app, "GET", "/health", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let response_json: HealthResponse = body_json(response).await;
        assert_eq!(response_json.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        let app = app_with_store(Arc::new(DownStore));

        let response = send(&app, "GET", "/health", None).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let response_json: UnhealthyResponse = body_json(response).await;
        assert_eq!(response_json.status, "unhealthy");
        assert!(!response_json.error.is_empty());
    }
}
