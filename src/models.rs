use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A single Todo item.
///
/// Every field is optional on input; an `id` of `0` asks the store to
/// assign the next identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct Todo {
    pub id: i64,
    pub content: String,
    pub order: i32,
    pub done: bool,
}

impl Entity for Todo {
    const TYPE_NAME: &'static str = "Todo";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// Query parameters accepted by `GET /todos`
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TodoQuery {
    /// Fetch a single Todo instead of the whole list
    #[param(value_type = Option<i64>)]
    pub id: Option<String>,
}
