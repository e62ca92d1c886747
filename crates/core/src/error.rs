//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether this error maps to a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TaskNotFound(_))
    }
}
