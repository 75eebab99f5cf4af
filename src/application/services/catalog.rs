use futures::TryStreamExt;
use tracing::{info, warn};

use crate::{
    application::{error::ApplicationError, services::storage_service::StorageService},
    domain::models::image::{is_safe_filename, ImageFormat},
};

/// Names of the images currently in the uploads directory, in directory-read
/// order. Entries without an allowed image extension are skipped.
pub async fn list_images(storage: &dyn StorageService) -> Result<Vec<String>, ApplicationError> {
    let mut entries = storage.list().await?;
    let mut images = Vec::new();

    while let Some(name) = entries.try_next().await? {
        if ImageFormat::from_filename(&name).is_some() {
            images.push(name);
        }
    }

    Ok(images)
}

/// Deletes one image by its stored name. Names that could escape the uploads
/// directory are refused before the filesystem is touched.
pub async fn delete_image(
    storage: &dyn StorageService,
    filename: &str,
) -> Result<(), ApplicationError> {
    if !is_safe_filename(filename) {
        warn!("Refusing to delete unsafe file name '{}'", filename);
        return Err(ApplicationError::validation("Invalid file name"));
    }

    storage.delete(filename).await?;
    info!("Deleted {}", filename);
    Ok(())
}
