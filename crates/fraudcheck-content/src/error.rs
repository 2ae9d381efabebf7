//! Content error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Storage error: {0}")]
    Storage(#[from] fraudcheck_storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid content: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for ContentError {
    fn from(e: std::io::Error) -> Self {
        ContentError::Config(e.to_string())
    }
}
