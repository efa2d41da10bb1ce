//! User-Agent detection stage.

use crate::model::EnvInfo;
use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

/// Attach the caller's [`EnvInfo`] to the request before calling the next stage.
pub async fn detect_env(mut req: Request, next: Next) -> Response {
    let ua = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let info = EnvInfo::from_user_agent(ua);
    req.extensions_mut().insert(info);
    next.run(req).await
}
