//! HTTP Basic authentication stage.

use crate::config::BasicAuthCredentials;
use crate::error::AppError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

/// Decode `Authorization: Basic <base64(user:password)>`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user_id, password) = decoded.split_once(':')?;
    Some((user_id.to_string(), password.to_string()))
}

/// Call the next stage only when the presented Basic credentials match.
/// On failure the wrapped handler never runs.
pub async fn require_basic_auth(
    State(expected): State<Arc<BasicAuthCredentials>>,
    req: Request,
    next: Next,
) -> Response {
    let presented = basic_credentials(req.headers());
    match presented {
        Some((user_id, password)) if expected.matches(&user_id, &password) => next.run(req).await,
        _ => {
            tracing::warn!(path = %req.uri().path(), "authorization required");
            AppError::Unauthorized.into_response()
        }
    }
}
