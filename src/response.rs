//! Success bodies for the TODO resource.

use crate::model::{MessageResponse, Todo, TodoResponse, TodosResponse};
use axum::{http::StatusCode, Json};

pub const DELETED_MESSAGE: &str = "Successfully deleted todos";

pub fn todo_ok(todo: Todo) -> (StatusCode, Json<TodoResponse>) {
    (StatusCode::OK, Json(TodoResponse { todo }))
}

pub fn todos_ok(todos: Vec<Todo>) -> (StatusCode, Json<TodosResponse>) {
    (StatusCode::OK, Json(TodosResponse { todos }))
}

pub fn message_ok(message: &str) -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::OK, Json(MessageResponse::new(message)))
}
