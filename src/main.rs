//! `todo-server`: loads config from env (and `.env`), opens the SQLite store, serves until SIGINT/SIGTERM.

use todo_stations::{app, connect, ensure_schema, AppConfig, AppState, TodoService};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_stations=info,todo_server=info,access_log=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    if config.basic_auth.user_id.is_empty() {
        tracing::warn!("BASIC_AUTH_USER_ID is not set; protected routes will reject every request");
    }

    let pool = connect(&config.db_path).await?;
    ensure_schema(&pool).await?;

    let shutdown_timeout = config.shutdown_timeout;
    let port = config.port;
    let state = AppState::new(TodoService::new(pool.clone(), config.db_timeout), config);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    let (fired_tx, mut fired_rx) = watch::channel(false);
    let server = axum::serve(listener, app(state)).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = fired_tx.send(true);
    });
    let mut serving = tokio::spawn(async move { server.await });

    // In-flight requests get a bounded grace period once a signal arrives.
    let grace_expired = async move {
        if fired_rx.wait_for(|fired| *fired).await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(shutdown_timeout).await;
    };
    tokio::select! {
        res = &mut serving => res??,
        _ = grace_expired => {
            tracing::warn!(?shutdown_timeout, "graceful shutdown timed out, aborting");
            serving.abort();
        }
    }
    pool.close().await;
    tracing::info!("server shutdown");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}
