mod error;
mod http_mapping;
mod traits;

pub use error::{RepositoryError, Result};
pub use http_mapping::{public_message, repository_error_to_status_code, Access};
pub use traits::TodoRepository;
