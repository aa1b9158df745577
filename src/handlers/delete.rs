use crate::error::{ApiError, ErrorResponse, parse_id};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};

/// DELETE /todos/{id} handler - Remove a Todo
///
/// Deleting an id that does not exist still succeeds.
#[utoipa::path(
    delete,
    path = routes::TODO_ITEM,
    params(
        ("id" = i64, Path, description = "Todo id")
    ),
    responses(
        (status = 204, description = "Todo removed"),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id_str) = path?;
    let id = parse_id(&id_str)?;

    state.todos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
