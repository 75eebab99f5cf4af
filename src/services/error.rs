use std::io;

use thiserror::Error;

use crate::application::error::ApplicationError;

/// Filesystem failures, worded without absolute paths so they are safe to
/// surface to clients.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Uploads path exists but is not a directory")]
    NotADirectory,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("I/O error: {0}")]
    Io(String),
}

impl StorageError {
    /// Classifies an I/O error that means the directory cannot be used.
    pub fn unavailable(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied,
            _ => StorageError::Io(error.to_string()),
        }
    }
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(_) => ApplicationError::NotFound,
            StorageError::AlreadyExists(name) => ApplicationError::NameCollision(name),
            StorageError::InvalidName(name) => {
                ApplicationError::Validation(format!("Invalid file name: {}", name))
            }
            e @ (StorageError::NotADirectory
            | StorageError::PermissionDenied
            | StorageError::Io(_)) => ApplicationError::StorageUnavailable(e.to_string()),
        }
    }
}
