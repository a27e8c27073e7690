//! Storage error surface

use sprint_types::SprintError;
use thiserror::Error;

/// Errors surfaced by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend failure: {0}")]
    Backend(String),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for SprintError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => SprintError::Storage(format!("missing record: {msg}")),
            StorageError::Conflict(msg) => SprintError::Storage(format!("write conflict: {msg}")),
            StorageError::Backend(msg) => SprintError::Storage(msg),
        }
    }
}
