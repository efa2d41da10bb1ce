//! SQL text for the `todos` table. Values are always bound, never interpolated.

pub const INSERT: &str = "INSERT INTO todos(subject, description) VALUES(?, ?)";

pub const SELECT_BY_ID: &str =
    "SELECT id, subject, description, created_at, updated_at FROM todos WHERE id = ?";

/// Newest first; caller binds the limit.
pub const SELECT_PAGE: &str =
    "SELECT id, subject, description, created_at, updated_at FROM todos ORDER BY id DESC LIMIT ?";

/// Rows strictly older than the cursor; caller binds the cursor id, then the limit.
pub const SELECT_PAGE_BEFORE: &str = "SELECT id, subject, description, created_at, updated_at FROM todos WHERE id < ? ORDER BY id DESC LIMIT ?";

pub const UPDATE: &str = "UPDATE todos SET subject = ?, description = ? WHERE id = ?";

/// DELETE for `count` ids: one `?` per id. `count` must be at least 1.
pub fn delete_in(count: usize) -> String {
    if count == 1 {
        return "DELETE FROM todos WHERE id = ?".to_string();
    }
    let placeholders = vec!["?"; count].join(", ");
    format!("DELETE FROM todos WHERE id IN ({})", placeholders)
}
