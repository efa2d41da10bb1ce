//! Access log stage.

use crate::extractors::Env;
use axum::{extract::Request, middleware::Next, response::Response};
use chrono::{DateTime, Utc};
use std::time::Instant;

/// `tracing` target of access-log events; filter on it to route them separately.
pub const ACCESS_LOG_TARGET: &str = "access_log";

/// One line per request that passed through [`access_log`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessLog {
    pub timestamp: DateTime<Utc>,
    /// Wall time of the wrapped stages, in milliseconds.
    pub latency: u64,
    pub path: String,
    pub os: String,
}

impl AccessLog {
    fn emit(&self) {
        tracing::info!(
            target: ACCESS_LOG_TARGET,
            timestamp = %self.timestamp.to_rfc3339(),
            latency = self.latency,
            path = %self.path,
            os = %self.os,
            "access"
        );
    }
}

/// Time the next stage and log the request once its response exists.
pub async fn access_log(req: Request, next: Next) -> Response {
    let timestamp = Utc::now();
    let started = Instant::now();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let env = Env::of(req.extensions());

    let response = next.run(req).await;

    let entry = AccessLog {
        timestamp,
        latency: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        path,
        os: env.os,
    };
    entry.emit();
    response
}
