//! TODO persistence. Every operation runs in exactly one transaction, bounded by
//! the service deadline; dropping the future (deadline or client disconnect)
//! drops the transaction, which rolls it back.

use crate::error::AppError;
use crate::model::Todo;
use crate::sql;
use sqlx::{SqliteConnection, SqlitePool};
use std::future::Future;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct TodoService {
    pool: SqlitePool,
    timeout: Duration,
}

impl TodoService {
    pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
        TodoService { pool, timeout }
    }

    /// Insert one row and return it as stored (id and timestamps assigned by SQLite).
    /// Callers validate that `subject` is non-empty.
    pub async fn create(&self, subject: &str, description: &str) -> Result<Todo, AppError> {
        self.with_deadline(async {
            let mut tx = self.pool.begin().await?;
            tracing::debug!(sql = %sql::INSERT, "query (tx)");
            let id = sqlx::query(sql::INSERT)
                .bind(subject)
                .bind(description)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
            let todo = fetch_by_id(&mut tx, id).await?;
            tx.commit().await?;
            tracing::info!(id, "todo created");
            Ok(todo)
        })
        .await
    }

    /// One page, newest first. `prev_id == 0` starts at the newest row; otherwise
    /// only rows with `id < prev_id` are returned. No match yields an empty vec.
    pub async fn read(&self, prev_id: i64, size: i64) -> Result<Vec<Todo>, AppError> {
        self.with_deadline(async {
            let mut tx = self.pool.begin().await?;
            let todos = if prev_id == 0 {
                tracing::debug!(sql = %sql::SELECT_PAGE, size, "query (tx)");
                sqlx::query_as::<_, Todo>(sql::SELECT_PAGE)
                    .bind(size)
                    .fetch_all(&mut *tx)
                    .await?
            } else {
                tracing::debug!(sql = %sql::SELECT_PAGE_BEFORE, prev_id, size, "query (tx)");
                sqlx::query_as::<_, Todo>(sql::SELECT_PAGE_BEFORE)
                    .bind(prev_id)
                    .bind(size)
                    .fetch_all(&mut *tx)
                    .await?
            };
            tx.commit().await?;
            Ok(todos)
        })
        .await
    }

    /// Replace subject and description of row `id`. Zero affected rows rolls back
    /// and reports `NotFound`.
    pub async fn update(&self, id: i64, subject: &str, description: &str) -> Result<Todo, AppError> {
        self.with_deadline(async {
            let mut tx = self.pool.begin().await?;
            tracing::debug!(sql = %sql::UPDATE, id, "query (tx)");
            let affected = sqlx::query(sql::UPDATE)
                .bind(subject)
                .bind(description)
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            if affected == 0 {
                tx.rollback().await?;
                return Err(AppError::NotFound(format!("todo {}", id)));
            }
            let todo = fetch_by_id(&mut tx, id).await?;
            tx.commit().await?;
            tracing::info!(id, "todo updated");
            Ok(todo)
        })
        .await
    }

    /// Delete all rows whose id is in `ids` with a single statement. An empty
    /// list is a no-op. Zero affected rows in total rolls back and reports
    /// `NotFound`; a partial match deletes what exists.
    pub async fn delete(&self, ids: &[i64]) -> Result<(), AppError> {
        if ids.is_empty() {
            return Ok(());
        }
        let stmt = sql::delete_in(ids.len());
        self.with_deadline(async {
            let mut tx = self.pool.begin().await?;
            tracing::debug!(sql = %stmt, ids = ?ids, "query (tx)");
            let mut query = sqlx::query(&stmt);
            for id in ids {
                query = query.bind(*id);
            }
            let affected = query.execute(&mut *tx).await?.rows_affected();
            if affected == 0 {
                tx.rollback().await?;
                return Err(AppError::NotFound(format!("todos {:?}", ids)));
            }
            tx.commit().await?;
            tracing::info!(requested = ids.len(), deleted = affected, "todos deleted");
            Ok(())
        })
        .await
    }

    async fn with_deadline<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| AppError::Timeout)?
    }
}

async fn fetch_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Todo, AppError> {
    tracing::debug!(sql = %sql::SELECT_BY_ID, id, "query (tx)");
    let todo = sqlx::query_as::<_, Todo>(sql::SELECT_BY_ID)
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(todo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;

    async fn service() -> TodoService {
        let pool = store::connect_in_memory().await.unwrap();
        store::ensure_schema(&pool).await.unwrap();
        TodoService::new(pool, Duration::from_secs(5))
    }

    async fn count(svc: &TodoService) -> usize {
        svc.read(0, 100).await.unwrap().len()
    }

    #[tokio::test]
    async fn create_then_read_newest() {
        let svc = service().await;
        let created = svc.create("buy milk", "2 bottles").await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.subject, "buy milk");
        assert_eq!(created.description, "2 bottles");

        let page = svc.read(0, 1).await.unwrap();
        assert_eq!(page, vec![created]);
    }

    #[tokio::test]
    async fn read_empty_table_is_empty_vec() {
        let svc = service().await;
        assert!(svc.read(0, 5).await.unwrap().is_empty());
        assert!(svc.read(10, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cursor_walk_visits_every_row_once() {
        let svc = service().await;
        for i in 0..11 {
            svc.create(&format!("task {}", i), "").await.unwrap();
        }
        for size in [1_i64, 3, 5, 11, 20] {
            let mut seen = Vec::new();
            let mut prev_id = 0;
            loop {
                let page = svc.read(prev_id, size).await.unwrap();
                if page.is_empty() {
                    break;
                }
                assert!(page.len() as i64 <= size);
                prev_id = page.last().unwrap().id;
                seen.extend(page.into_iter().map(|t| t.id));
            }
            let expected: Vec<i64> = (1..=11).rev().collect();
            assert_eq!(seen, expected, "page size {}", size);
        }
    }

    #[tokio::test]
    async fn cursor_is_stable_under_concurrent_insert() {
        let svc = service().await;
        for i in 0..4 {
            svc.create(&format!("task {}", i), "").await.unwrap();
        }
        let first = svc.read(0, 2).await.unwrap();
        svc.create("late arrival", "").await.unwrap();
        let second = svc.read(first.last().unwrap().id, 2).await.unwrap();
        let ids: Vec<i64> = second.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_identity() {
        let svc = service().await;
        let created = svc.create("buy milk", "").await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let updated = svc.update(created.id, "buy bread", "whole grain").await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.subject, "buy bread");
        assert_eq!(updated.description, "whole grain");
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let svc = service().await;
        let created = svc.create("keep me", "").await.unwrap();
        let err = svc.update(42, "x", "y").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(svc.read(0, 5).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn delete_empty_list_is_noop() {
        let svc = service().await;
        svc.create("a", "").await.unwrap();
        svc.delete(&[]).await.unwrap();
        assert_eq!(count(&svc).await, 1);
    }

    #[tokio::test]
    async fn delete_many_removes_exactly_those_rows() {
        let svc = service().await;
        for s in ["a", "b", "c", "d"] {
            svc.create(s, "").await.unwrap();
        }
        svc.delete(&[1, 3]).await.unwrap();
        let ids: Vec<i64> = svc.read(0, 10).await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 2]);
    }

    #[tokio::test]
    async fn delete_with_no_match_is_not_found_and_unchanged() {
        let svc = service().await;
        svc.create("a", "").await.unwrap();
        let err = svc.delete(&[7, 8]).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(count(&svc).await, 1);
    }

    #[tokio::test]
    async fn delete_partial_match_succeeds() {
        let svc = service().await;
        svc.create("a", "").await.unwrap();
        svc.create("b", "").await.unwrap();
        svc.delete(&[2, 99]).await.unwrap();
        assert_eq!(count(&svc).await, 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let svc = service().await;
        svc.create("a", "").await.unwrap();
        svc.create("b", "").await.unwrap();
        svc.delete(&[2]).await.unwrap();
        let next = svc.create("c", "").await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn deadline_expiry_reports_timeout_and_writes_nothing() {
        let pool = store::connect_in_memory().await.unwrap();
        store::ensure_schema(&pool).await.unwrap();
        let svc = TodoService::new(pool.clone(), Duration::from_millis(50));

        // Hold the only connection so the operation cannot start.
        let held = pool.acquire().await.unwrap();
        let err = svc.create("never stored", "").await.unwrap_err();
        assert!(matches!(err, AppError::Timeout));
        drop(held);

        assert_eq!(count(&svc).await, 0);
    }

    #[tokio::test]
    async fn deadline_inside_open_transaction_rolls_back() {
        let dir = std::env::temp_dir().join(format!("todo-stations-deadline-{}", std::process::id()));
        let path = dir.join("todo.db");
        let pool = store::connect(&path).await.unwrap();
        store::ensure_schema(&pool).await.unwrap();
        let svc = TodoService::new(pool.clone(), Duration::from_millis(200));
        let seed = svc.create("seed", "").await.unwrap();

        // A second pool on the same file holds the write lock.
        let other = store::connect(&path).await.unwrap();
        let mut locker = other.acquire().await.unwrap();
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *locker).await.unwrap();

        let err = svc.update(seed.id, "changed", "").await.unwrap_err();
        assert!(matches!(err, AppError::Timeout));
        let err = svc.create("ghost", "").await.unwrap_err();
        assert!(matches!(err, AppError::Timeout));

        sqlx::query("ROLLBACK").execute(&mut *locker).await.unwrap();
        drop(locker);
        other.close().await;

        // Abandoned statements may still be draining on their connections.
        let svc = TodoService::new(pool.clone(), Duration::from_secs(5));
        let rows = svc.read(0, 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, "seed");
        let next = svc.create("after", "").await.unwrap();
        assert_eq!(next.id, seed.id + 1);

        pool.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }
}
