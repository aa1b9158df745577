use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::routes;
use crate::state::AppState;

/// Build the service router.
///
/// API routes are matched first; any other path is served from the static
/// directory.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(
            routes::TODO_LIST,
            get(handlers::list_handler).post(handlers::post_handler),
        )
        .route(
            routes::TODO_ITEM,
            get(handlers::get_handler)
                .post(handlers::post_item_handler)
                .put(handlers::put_handler)
                .delete(handlers::delete_handler),
        )
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
