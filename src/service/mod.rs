//! TodoService: transactional CRUD over the `todos` table.

mod todo;
pub use todo::TodoService;
