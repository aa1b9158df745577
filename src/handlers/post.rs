use crate::error::{ApiError, ErrorResponse, parse_id};
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

/// POST /todos handler - Create or update a Todo
///
/// A Todo without an id gets the next id from the store. A Todo with an id
/// overwrites whatever is stored under it.
#[utoipa::path(
    post,
    path = routes::TODO_LIST,
    request_body = Todo,
    responses(
        (status = 200, description = "Todo stored", body = Todo),
        (status = 400, description = "Invalid JSON body", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn post_handler(
    State(state): State<AppState>,
    payload: Result<Json<Todo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(todo) = payload?;

    let stored = state.todos.create_or_update(todo).await?;
    Ok((StatusCode::OK, Json(stored)))
}

/// POST /todos/{id} handler - Create or update the Todo with this id
///
/// A non-zero path id replaces any id in the body.
#[utoipa::path(
    post,
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
pub async fn post_item_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Todo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Path(id_str) = path?;
    let todo = with_path_id(parse_id(&id_str)?, payload?.0);

    let stored = state.todos.create_or_update(todo).await?;
    Ok((StatusCode::OK, Json(stored)))
}

/// Apply a path id to a request body; `0` leaves the body id alone.
pub(crate) fn with_path_id(id: i64, mut todo: Todo) -> Todo {
    if id != 0 {
        todo.id = id;
    }
    todo
}
