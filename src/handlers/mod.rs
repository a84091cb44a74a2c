mod health;
pub mod todos;

pub use health::{health_check, readiness_check};
pub use todos::{create_todo, delete_todo, get_todo, list_todos};
