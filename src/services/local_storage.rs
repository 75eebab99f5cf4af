use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use futures::{stream, StreamExt};
use tokio::{
    fs::{self, OpenOptions},
    io::AsyncWriteExt,
};
use tracing::{debug, warn};

use crate::{
    application::{
        error::ApplicationError,
        services::{ByteStream, EntryStream, StorageService},
    },
    domain::models::image::is_safe_filename,
    services::error::StorageError,
};

/// Uploads kept as flat files in one directory on the local filesystem.
pub struct LocalDirectoryStorage {
    root: PathBuf,
}

impl LocalDirectoryStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_filename(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl StorageService for LocalDirectoryStorage {
    async fn ensure_ready(&self) -> Result<(), ApplicationError> {
        match fs::metadata(&self.root).await {
            Ok(metadata) if metadata.is_dir() => return Ok(()),
            Ok(_) => return Err(StorageError::NotADirectory.into()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StorageError::unavailable(e).into()),
        }

        fs::create_dir_all(&self.root)
            .await
            .map_err(StorageError::unavailable)?;
        debug!("Created uploads directory {}", self.root.display());
        Ok(())
    }

    async fn list(&self) -> Result<EntryStream, ApplicationError> {
        let read_dir = fs::read_dir(&self.root)
            .await
            .map_err(StorageError::unavailable)?;

        // Only regular files are images; subdirectories and the like are skipped.
        let entries = stream::try_unfold(read_dir, |mut read_dir| async move {
            while let Some(entry) = read_dir
                .next_entry()
                .await
                .map_err(StorageError::unavailable)?
            {
                let is_file = entry
                    .file_type()
                    .await
                    .map(|file_type| file_type.is_file())
                    .unwrap_or(false);
                if is_file {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    return Ok(Some((name, read_dir)));
                }
            }
            Ok::<_, ApplicationError>(None)
        });

        Ok(entries.boxed())
    }

    async fn write(&self, name: &str, mut body: ByteStream<'_>) -> Result<u64, ApplicationError> {
        let path = self.path_for(name)?;

        // create_new: the filesystem's atomic create-if-absent is the only
        // guard against two writers sharing a name.
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(name.to_string()),
                _ => StorageError::unavailable(e),
            })?;
        let partial = PartialFile::new(path);

        let copied = async {
            let mut written: u64 = 0;
            while let Some(chunk) = body.next().await {
                let chunk = chunk?;
                file.write_all(&chunk)
                    .await
                    .map_err(StorageError::unavailable)?;
                written += chunk.len() as u64;
            }
            file.flush().await.map_err(StorageError::unavailable)?;
            Ok::<_, ApplicationError>(written)
        }
        .await;
        drop(file);

        match copied {
            Ok(written) => {
                partial.keep();
                Ok(written)
            }
            Err(e) => {
                partial.remove().await;
                Err(e)
            }
        }
    }

    async fn delete(&self, name: &str) -> Result<(), ApplicationError> {
        let path = self.path_for(name)?;

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(StorageError::NotFound(name.to_string()).into()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_string()).into())
            }
            Err(e) => return Err(StorageError::unavailable(e).into()),
        }

        fs::remove_file(&path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            _ => StorageError::unavailable(e),
        })?;
        Ok(())
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

/// Half-written upload. Failed writes call `remove`; if the owning future is
/// dropped mid-write instead, `Drop` removes the file synchronously since no
/// runtime is guaranteed to be available there.
struct PartialFile {
    path: Option<PathBuf>,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn keep(mut self) {
        self.path = None;
    }

    async fn remove(mut self) {
        if let Some(path) = self.path.take() {
            match fs::remove_file(&path).await {
                Ok(()) => debug!("Removed partial upload {}", path.display()),
                Err(e) => warn!("Could not remove partial upload {}: {}", path.display(), e),
            }
        }
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            match std::fs::remove_file(&path) {
                Ok(()) => debug!("Removed partial upload {}", path.display()),
                Err(e) => warn!("Could not remove partial upload {}: {}", path.display(), e),
            }
        }
    }
}
