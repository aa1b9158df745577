use crate::error::{ApiError, ErrorResponse, parse_id};
use crate::models::TodoQuery;
use crate::routes;
use crate::service::ReadResult;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};

/// GET /todos handler - List every Todo
///
/// Order of the returned array is unspecified. Passing `?id=N` fetches a
/// single Todo exactly like `GET /todos/N`.
#[utoipa::path(
    get,
    path = routes::TODO_LIST,
    params(TodoQuery),
    responses(
        (status = 200, description = "All todos, or a single Todo when `id` is given", body = ReadResult),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    query: Result<Query<TodoQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ReadResult>), ApiError> {
    let Query(query) = query?;
    let id = match query.id.as_deref() {
        Some(raw) => parse_id(raw)?,
        None => 0,
    };

    let result = state.todos.read(id).await?;
    if let ReadResult::All(todos) = &result {
        tracing::info!("Listed {} todos", todos.len());
    }

    Ok((StatusCode::OK, Json(result)))
}
