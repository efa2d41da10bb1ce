//! Health and diagnostic routes.
//!
//! | path        | stages (outer to inner)                  |
//! |-------------|------------------------------------------|
//! | `/healthz`  | env detection                            |
//! | `/do_panic` | recovery                                 |
//! | `/os_info`  | basic auth, env detection, access log    |
//! | `/heavy`    | env detection, access log                |

use crate::handlers::diagnostics::{do_panic, healthz, heavy, os_info};
use crate::middleware::{access_log, detect_env, recovery, require_basic_auth};
use crate::state::AppState;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

pub fn common_routes(state: &AppState) -> Router<AppState> {
    let credentials = Arc::new(state.config.basic_auth.clone());

    Router::new()
        .route("/healthz", get(healthz).layer(from_fn(detect_env)))
        .route("/do_panic", get(do_panic).layer(recovery()))
        .route(
            "/os_info",
            get(os_info).layer(
                ServiceBuilder::new()
                    .layer(from_fn_with_state(credentials, require_basic_auth))
                    .layer(from_fn(detect_env))
                    .layer(from_fn(access_log)),
            ),
        )
        .route(
            "/heavy",
            get(heavy).layer(
                ServiceBuilder::new()
                    .layer(from_fn(detect_env))
                    .layer(from_fn(access_log)),
            ),
        )
}
