//! TODO resource route. Plain CRUD carries no middleware; unlisted methods get 405.

use crate::handlers::todo::{create, delete, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub const TODOS_PATH: &str = "/todos";

pub fn todo_routes() -> Router<AppState> {
    Router::new().route(TODOS_PATH, get(read).post(create).put(update).delete(delete))
}
