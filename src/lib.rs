//! TODO REST service: transactional CRUD over SQLite, plus per-route
//! authentication, environment detection, access logging and panic recovery.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod user_agent;

pub use config::{AppConfig, BasicAuthCredentials};
pub use error::{AppError, ConfigError};
pub use model::{EnvInfo, Todo};
pub use routes::{common_routes, todo_routes};
pub use service::TodoService;
pub use state::AppState;
pub use store::{connect, connect_in_memory, ensure_schema};

use axum::Router;

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(todo_routes())
        .merge(common_routes(&state))
        .with_state(state)
}
