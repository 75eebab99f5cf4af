use serde::Serialize;
use thiserror::Error;

/// A file that did not make it into the uploads directory, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedFile {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{0}")]
    Validation(String),

    #[error("File exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: u64 },

    #[error("Image not found")]
    NotFound,

    #[error("A file named '{0}' already exists")]
    NameCollision(String),

    #[error("No valid images were uploaded")]
    NoValidFiles { rejected: Vec<RejectedFile> },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApplicationError::Validation(message.into())
    }

    /// Whether the failure is attributable to the client rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ApplicationError::Validation(_)
                | ApplicationError::PayloadTooLarge { .. }
                | ApplicationError::NotFound
                | ApplicationError::NoValidFiles { .. }
        )
    }
}
