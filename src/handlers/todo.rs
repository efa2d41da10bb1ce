//! TODO resource handlers. Input is validated here, before any store access;
//! status mapping of service errors happens in [`AppError`]'s `IntoResponse`.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{CreateTodoRequest, DeleteTodoRequest, UpdateTodoRequest};
use crate::response::{message_ok, todo_ok, todos_ok, DELETED_MESSAGE};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Optional non-negative integer query parameter. Empty counts as absent.
fn query_i64(params: &HashMap<String, String>, key: &str, default: i64) -> Result<i64, AppError> {
    let Some(raw) = params.get(key).map(|s| s.trim()).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };
    let n: i64 = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid {}: '{}'", key, raw)))?;
    if n < 0 {
        return Err(AppError::BadRequest(format!("{} must not be negative", key)));
    }
    Ok(n)
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateTodoRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.subject.is_empty() {
        return Err(AppError::BadRequest("subject must not be empty".into()));
    }
    let todo = state.todos.create(&req.subject, &req.description).await?;
    Ok(todo_ok(todo))
}

pub async fn read(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let prev_id = query_i64(&params, "prev_id", 0)?;
    let size = query_i64(&params, "size", DEFAULT_PAGE_SIZE)?;
    let todos = state.todos.read(prev_id, size).await?;
    Ok(todos_ok(todos))
}

pub async fn update(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateTodoRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.subject.is_empty() {
        return Err(AppError::BadRequest("subject must not be empty".into()));
    }
    if req.id == 0 {
        return Err(AppError::BadRequest("id is required".into()));
    }
    let todo = state.todos.update(req.id, &req.subject, &req.description).await?;
    Ok(todo_ok(todo))
}

pub async fn delete(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<DeleteTodoRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }
    state.todos.delete(&req.ids).await?;
    Ok(message_ok(DELETED_MESSAGE))
}
