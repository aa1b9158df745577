use crate::config::Config;
use crate::service::TodoService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
    pub config: Arc<Config>,
}
