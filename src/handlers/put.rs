use crate::error::{ApiError, ErrorResponse, parse_id};
use crate::handlers::post::with_path_id;
use crate::models::Todo;
use crate::routes;
use crate::state::AppState;
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

/// PUT /todos/{id} handler - Store a Todo
///
/// Same upsert as POST: the Todo does not need to exist beforehand.
#[utoipa::path(
    put,
    path = routes::TODO_ITEM,
    params(
        ("id" = i64, Path, description = "Todo id")
    ),
    request_body = Todo,
    responses(
        (status = 200, description = "Todo stored", body = Todo),
        (status = 400, description = "Invalid id or JSON body", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn put_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Todo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Path(id_str) = path?;
    let todo = with_path_id(parse_id(&id_str)?, payload?.0);

    let stored = state.todos.update(todo).await?;
    Ok((StatusCode::OK, Json(stored)))
}
