mod requests;
mod types;

pub use requests::{CreateTodoRequest, UpdateTodoRequest};
pub use types::{Todo, TodoId};
