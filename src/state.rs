//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::service::TodoService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
    /// Built once at startup; never re-read from the environment.
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(todos: TodoService, config: AppConfig) -> Self {
        AppState {
            todos,
            config: Arc::new(config),
        }
    }
}
