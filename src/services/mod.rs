mod error;
mod local_storage;

pub use error::StorageError;
pub use local_storage::LocalDirectoryStorage;

use std::{path::Path, sync::Arc};

use crate::application::services::StorageService;

pub fn create_storage_service(uploads_dir: &Path) -> Arc<dyn StorageService> {
    Arc::new(LocalDirectoryStorage::new(uploads_dir.to_path_buf()))
}
