//! Per-route request stages, composed with `axum::middleware::from_fn` and
//! `tower::ServiceBuilder` when routes are registered (outermost layer first).
//!
//! - [`detect_env`]: parse User-Agent into [`crate::model::EnvInfo`] request extension
//! - [`require_basic_auth`]: reject with 401 before the wrapped handler runs
//! - [`access_log`]: one `access_log` event per request, after the response is built
//! - [`recovery`]: turn a handler panic into a generic 500

mod auth;
mod env_info;
mod logging;
mod recovery;

pub use auth::{basic_credentials, require_basic_auth};
pub use env_info::detect_env;
pub use logging::{access_log, AccessLog, ACCESS_LOG_TARGET};
pub use recovery::{recovery, PanicHandler};
