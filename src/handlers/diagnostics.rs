//! Health probe and diagnostic endpoints.

use crate::extractors::Env;
use crate::model::{EnvInfo, MessageResponse};
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn healthz() -> Json<MessageResponse> {
    Json(MessageResponse::new("OK"))
}

/// Environment info attached by the environment-detection stage.
pub async fn os_info(Env(info): Env) -> Json<EnvInfo> {
    Json(info)
}

/// Deliberately panics; only mounted behind the recovery stage.
pub async fn do_panic() -> &'static str {
    panic!("panic requested via /do_panic")
}

/// Slow endpoint for observing latency in the access log.
pub async fn heavy(State(state): State<AppState>) -> &'static str {
    tracing::info!("heavy process starts");
    tokio::time::sleep(state.config.heavy_delay).await;
    tracing::info!("heavy process done");
    "hello\n"
}
