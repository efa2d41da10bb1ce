//! Read the request-scoped [`EnvInfo`] attached by the environment-detection middleware.

use crate::model::EnvInfo;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Environment info of the current request; empty OS/browser when the
/// environment-detection stage did not run.
#[derive(Clone, Debug, Default)]
pub struct Env(pub EnvInfo);

impl Env {
    /// The typed extension slot is the key, so no other value can collide with it.
    pub fn of(extensions: &axum::http::Extensions) -> EnvInfo {
        extensions.get::<EnvInfo>().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Env
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Env(Env::of(&parts.extensions)))
    }
}
