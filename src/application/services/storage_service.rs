use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::error::ApplicationError;

/// Incoming file content. An `Err` item aborts the write that consumes it.
pub type ByteStream<'a> = BoxStream<'a, Result<Bytes, ApplicationError>>;

/// One-shot sequence of entry names from a single directory read.
pub type EntryStream = BoxStream<'static, Result<String, ApplicationError>>;

/// Directory-scoped file operations backing the uploads directory.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Creates the directory if absent. Idempotent.
    async fn ensure_ready(&self) -> Result<(), ApplicationError>;

    async fn list(&self) -> Result<EntryStream, ApplicationError>;

    /// Writes a new file named `name` and returns the number of bytes written.
    ///
    /// Never overwrites: an existing file yields `NameCollision`. If `body`
    /// fails, or the returned future is dropped, no file is left behind.
    async fn write(&self, name: &str, body: ByteStream<'_>) -> Result<u64, ApplicationError>;

    async fn delete(&self, name: &str) -> Result<(), ApplicationError>;

    /// Directory served under `/uploads`.
    fn root(&self) -> &Path;
}
