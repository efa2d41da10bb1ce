//! HTTP handlers for the TODO resource and diagnostics.

pub mod diagnostics;
pub mod todo;
