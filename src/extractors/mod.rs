//! Request extractors.

mod env;
mod json_body;

pub use env::Env;
pub use json_body::JsonBody;
