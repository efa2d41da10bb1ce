//! SQLite pool setup and `todos` DDL.

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// `AUTOINCREMENT` keeps ids strictly increasing even after deletes, which the
/// `prev_id` cursor depends on.
const TODOS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    subject     TEXT NOT NULL CHECK (subject <> ''),
    description TEXT NOT NULL DEFAULT '',
    created_at  DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

const TODOS_UPDATED_AT_TRIGGER: &str = r#"
CREATE TRIGGER IF NOT EXISTS todos_touch_updated_at
AFTER UPDATE OF subject, description ON todos
BEGIN
    UPDATE todos SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END
"#;

/// Open a pool on the SQLite file at `path`, creating the file and its parent directory if missing.
pub async fn connect(path: &Path) -> Result<SqlitePool, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::Db(sqlx::Error::Io(e)))?;
    }
    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(opts)
        .await?;
    tracing::info!(path = %path.display(), "sqlite pool opened");
    Ok(pool)
}

/// Single-connection in-memory pool. The connection is never recycled, since
/// dropping it would drop the database.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::new().in_memory(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the `todos` table and its `updated_at` trigger. Idempotent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(TODOS_DDL).execute(pool).await?;
    sqlx::query(TODOS_UPDATED_AT_TRIGGER).execute(pool).await?;
    Ok(())
}
