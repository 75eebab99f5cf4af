use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        rejection::PathRejection,
        Multipart, Path, State,
    },
    Json,
};
use futures::StreamExt;
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::image_dto::{
            DeleteImageResponse, ListImagesResponse, ListedImage, UploadImageResponse,
            UploadImagesResponse, UploadedImage,
        },
        state::AppState,
    },
    application::{
        error::ApplicationError,
        services::{catalog, BatchReport, IncomingFile},
    },
    domain::config::{public_url::relative_path, RequestOrigin},
};

/// Multipart field carrying the file for a single upload.
pub const SINGLE_FIELD: &str = "image";
/// Multipart field carrying the files for a batch upload.
pub const BATCH_FIELD: &str = "images";

const DEFAULT_MIME: &str = "application/octet-stream";

pub struct ImageController;

impl ImageController {
    /// POST /api/upload
    pub async fn upload_image(
        State(app_state): State<AppState>,
        origin: RequestOrigin,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<UploadImageResponse>, ApplicationError> {
        let mut multipart = multipart.map_err(not_multipart)?;

        while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
            if field.name() != Some(SINGLE_FIELD) {
                continue;
            }

            let image = app_state.pipeline.ingest(incoming_file(field)).await?;
            let url = app_state.public_url.resolve(&image.filename, &origin);
            return Ok(Json(UploadImageResponse::new(image, url)));
        }

        warn!("Upload request without an '{}' field", SINGLE_FIELD);
        Err(ApplicationError::validation("No image was uploaded"))
    }

    /// POST /api/upload-multiple
    ///
    /// Files are accepted or rejected one by one. Files past the batch cap are
    /// rejected without being stored.
    pub async fn upload_images(
        State(app_state): State<AppState>,
        origin: RequestOrigin,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<UploadImagesResponse>, ApplicationError> {
        let mut multipart = multipart.map_err(not_multipart)?;
        let max_files = app_state.pipeline.limits().max_batch_files;
        let mut report = BatchReport::new();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    // The request never completes, so nothing it stored may stay.
                    app_state.pipeline.discard(report.accepted()).await;
                    return Err(invalid_multipart(e));
                }
            };

            if field.name() != Some(BATCH_FIELD) {
                continue;
            }

            let file = incoming_file(field);
            let original_name = file.original_name.clone();

            if report.len() >= max_files {
                warn!("Rejected '{}': batch limit of {} reached", original_name, max_files);
                report.reject(
                    original_name,
                    ApplicationError::validation(format!(
                        "Too many files (maximum {} per request)",
                        max_files
                    )),
                );
                continue;
            }

            let outcome = app_state.pipeline.ingest(file).await;
            report.record(original_name, outcome);
        }

        let (accepted, rejected) = report.finish()?;
        info!(
            "Batch upload stored {} file(s), rejected {}",
            accepted.len(),
            rejected.len()
        );

        let images = accepted
            .into_iter()
            .map(|image| {
                let url = app_state.public_url.resolve(&image.filename, &origin);
                UploadedImage::new(image, url)
            })
            .collect();

        Ok(Json(UploadImagesResponse::new(images, rejected)))
    }

    /// GET /api/images
    pub async fn list_images(
        State(app_state): State<AppState>,
        origin: RequestOrigin,
    ) -> Result<Json<ListImagesResponse>, ApplicationError> {
        let names = catalog::list_images(app_state.storage.as_ref()).await?;

        let images: Vec<ListedImage> = names
            .into_iter()
            .map(|filename| ListedImage {
                url: app_state.public_url.resolve(&filename, &origin),
                path: relative_path(&filename),
                filename,
            })
            .collect();

        Ok(Json(ListImagesResponse::from(images)))
    }

    /// DELETE /api/image/{filename}
    pub async fn delete_image(
        State(app_state): State<AppState>,
        filename: Result<Path<String>, PathRejection>,
    ) -> Result<Json<DeleteImageResponse>, ApplicationError> {
        let Path(filename) = filename.map_err(|e| {
            warn!("Invalid file name in path: {}", e);
            ApplicationError::validation("Invalid file name")
        })?;

        catalog::delete_image(app_state.storage.as_ref(), &filename).await?;

        Ok(Json(DeleteImageResponse {
            success: true,
            message: "Image deleted successfully".to_string(),
        }))
    }
}

fn incoming_file(field: Field<'_>) -> IncomingFile<'_> {
    let original_name = field.file_name().unwrap_or_default().to_string();
    let declared_mime = field.content_type().unwrap_or(DEFAULT_MIME).to_string();

    let body = field
        .map(|chunk| {
            chunk.map_err(|e| {
                ApplicationError::validation(format!("Failed to read upload: {}", e.body_text()))
            })
        })
        .boxed();

    IncomingFile {
        original_name,
        declared_mime,
        body,
    }
}

fn not_multipart(e: MultipartRejection) -> ApplicationError {
    warn!("Rejected non-multipart upload: {}", e);
    ApplicationError::validation("Expected a multipart/form-data request")
}

fn invalid_multipart(e: MultipartError) -> ApplicationError {
    warn!("Invalid multipart data: {}", e);
    ApplicationError::validation("Invalid multipart request")
}
