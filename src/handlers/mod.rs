pub mod health;
pub mod get;
pub mod list;
pub mod post;
pub mod put;
pub mod delete;

pub use health::health_handler;
pub use get::get_handler;
pub use list::list_handler;
pub use post::{post_handler, post_item_handler};
pub use put::put_handler;
pub use delete::delete_handler;
