use crate::error::{ApiError, ErrorResponse, parse_id};
use crate::routes;
use crate::service::ReadResult;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};

/// GET /todos/{id} handler - Retrieve a single Todo
///
/// An id of `0` behaves like `GET /todos` and returns every Todo.
#[utoipa::path(
    get,
    path = routes::TODO_ITEM,
    params(
        ("id" = i64, Path, description = "Todo id")
    ),
    responses(
        (status = 200, description = "Todo found; id 0 returns every Todo as an array", body = ReadResult),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, Json<ReadResult>), ApiError> {
    let Path(id_str) = path?;
    let id = parse_id(&id_str)?;

    tracing::debug!("Read todo request for id: {}", id);
    let result = state.todos.read(id).await?;
    Ok((StatusCode::OK, Json(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{DownStore, app_with_store, body_json, send, test_app};
    use crate::models::Todo;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_endpoint_success() {
        let app = test_app();

        let created = send(
            &app,
            "POST",
            "/todos",
            Some(r#"{"content":"read me","order":4,"done":true}"#),
        )
        .await;
        let created: Todo = body_json(created).await;

        let response = send(&app, "GET", &format!("/todos/{}", created.id), None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let fetched: Todo = body_json(response).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_endpoint_not_found() {
        let app = test_app();

        let response = send(&app, "GET", "/todos/999", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = body_json(response).await;
        assert!(error.error.contains("999"));
    }

    #[tokio::test]
    async fn test_get_endpoint_invalid_id() {
        let app = test_app();

        let response = send(&app, "GET", "/todos/not-a-number", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = body_json(response).await;
        assert!(error.error.contains("not-a-number"));
    }

    #[tokio::test]
    async fn test_get_endpoint_undecodable_path_is_json_error() {
        let app = test_app();

        let response = send(&app, "GET", "/todos/%FF", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
        let error: ErrorResponse = body_json(response).await;
        assert!(error.error.starts_with("Invalid id"));
    }

    #[tokio::test]
    async fn test_get_endpoint_zero_lists_all() {
        let app = test_app();
        send(&app, "POST", "/todos", Some(r#"{"content":"a"}"#)).await;
        send(&app, "POST", "/todos", Some(r#"{"content":"b"}"#)).await;

        let response = send(&app, "GET", "/todos/0", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let todos: Vec<Todo> = body_json(response).await;
        assert_eq!(todos.len(), 2);
    }

    #[tokio::test]
    async fn test_get_endpoint_store_down() {
        let app = app_with_store(Arc::new(DownStore));

        let response = send(&app, "GET", "/todos/1", None).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
