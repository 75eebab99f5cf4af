//! Upload ingestion: validate, name, and store incoming image files.
//!
//! Each file moves through validation, naming, and storage independently.
//! A file either ends up `Accepted` (returned as a [`StoredImage`]) or
//! `Rejected` (returned as an [`ApplicationError`]); batches collect those
//! outcomes in a [`BatchReport`].

use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        error::{ApplicationError, RejectedFile},
        services::storage_service::{ByteStream, StorageService},
    },
    domain::{
        config::UploadLimits,
        models::image::{extension_of, ImageFormat, StoredImage},
    },
};

pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Only images are allowed (jpeg, jpg, png, gif, webp)";

/// A file as received from the client. Name and MIME type are advisory.
pub struct IncomingFile<'a> {
    pub original_name: String,
    pub declared_mime: String,
    pub body: ByteStream<'a>,
}

#[derive(Clone)]
pub struct IngestionPipeline {
    storage: Arc<dyn StorageService>,
    limits: UploadLimits,
}

impl IngestionPipeline {
    pub fn new(storage: Arc<dyn StorageService>, limits: UploadLimits) -> Self {
        Self { storage, limits }
    }

    pub fn limits(&self) -> UploadLimits {
        self.limits
    }

    /// Both the original extension and the declared MIME type must be on the
    /// allow-list. The format is taken from the extension, since that is what
    /// the stored name keeps.
    pub fn validate(
        &self,
        original_name: &str,
        declared_mime: &str,
    ) -> Result<ImageFormat, ApplicationError> {
        match (
            ImageFormat::from_filename(original_name),
            ImageFormat::from_mime(declared_mime),
        ) {
            (Some(format), Some(_)) => Ok(format),
            _ => Err(ApplicationError::validation(UNSUPPORTED_TYPE_MESSAGE)),
        }
    }

    /// Runs one file through the pipeline.
    pub async fn ingest(&self, file: IncomingFile<'_>) -> Result<StoredImage, ApplicationError> {
        let original_name = file.original_name.clone();

        match self.store(file).await {
            Ok(image) => {
                info!(
                    "Accepted '{}' as {} ({} bytes)",
                    original_name, image.filename, image.size
                );
                Ok(image)
            }
            Err(e) if e.is_client_error() => {
                warn!("Rejected '{}': {}", original_name, e);
                Err(e)
            }
            Err(e) => {
                error!("Failed to store '{}': {}", original_name, e);
                Err(e)
            }
        }
    }

    async fn store(&self, file: IncomingFile<'_>) -> Result<StoredImage, ApplicationError> {
        let IncomingFile {
            original_name,
            declared_mime,
            body,
        } = file;

        self.validate(&original_name, &declared_mime)?;

        let mime_type = ImageFormat::from_mime(&declared_mime)
            .map(|format| format.mime_type().to_string())
            .unwrap_or(declared_mime);
        let extension = extension_of(&original_name).unwrap_or_default();
        let filename = generate_filename(extension);

        self.storage.ensure_ready().await?;

        let body = limit_size(body, self.limits.max_file_size);
        let size = self.storage.write(&filename, body).await?;

        Ok(StoredImage::new(filename, size, mime_type))
    }

    /// Best-effort removal of files already stored for a request that failed
    /// before its response was produced.
    pub async fn discard(&self, images: &[StoredImage]) {
        for image in images {
            match self.storage.delete(&image.filename).await {
                Ok(()) => info!("Discarded {} from an aborted request", image.filename),
                Err(e) => warn!("Could not discard {}: {}", image.filename, e),
            }
        }
    }
}

/// `<unix millis>-<random uuid>.<extension>`: unique without coordination
/// between concurrent uploads.
pub fn generate_filename(extension: &str) -> String {
    format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        extension
    )
}

/// Fails the stream as soon as more than `limit` bytes have been seen, so an
/// oversized upload is never read to the end.
fn limit_size(body: ByteStream<'_>, limit: u64) -> ByteStream<'_> {
    let mut received: u64 = 0;
    body.map(move |chunk| {
        let chunk = chunk?;
        received = received.saturating_add(chunk.len() as u64);
        if received > limit {
            return Err(ApplicationError::PayloadTooLarge { limit });
        }
        Ok(chunk)
    })
    .boxed()
}

/// Per-request tally of a batch upload.
#[derive(Debug, Default)]
pub struct BatchReport {
    accepted: Vec<StoredImage>,
    rejected: Vec<RejectedFile>,
    server_error: Option<ApplicationError>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, original_name: String, outcome: Result<StoredImage, ApplicationError>) {
        match outcome {
            Ok(image) => self.accepted.push(image),
            Err(e) => self.reject(original_name, e),
        }
    }

    pub fn reject(&mut self, original_name: String, error: ApplicationError) {
        self.rejected.push(RejectedFile {
            filename: original_name,
            reason: error.to_string(),
        });
        if !error.is_client_error() && self.server_error.is_none() {
            self.server_error = Some(error);
        }
    }

    /// Number of files seen so far, accepted or not.
    pub fn len(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn accepted(&self) -> &[StoredImage] {
        &self.accepted
    }

    /// Succeeds if at least one file was accepted. With none accepted, a
    /// server-side failure is surfaced as such; otherwise the batch is
    /// `NoValidFiles`.
    pub fn finish(self) -> Result<(Vec<StoredImage>, Vec<RejectedFile>), ApplicationError> {
        if !self.accepted.is_empty() {
            return Ok((self.accepted, self.rejected));
        }
        match self.server_error {
            Some(e) => Err(e),
            None => Err(ApplicationError::NoValidFiles {
                rejected: self.rejected,
            }),
        }
    }
}
