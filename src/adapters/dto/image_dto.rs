use serde::Serialize;

use crate::{application::error::RejectedFile, domain::models::image::StoredImage};

#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub url: String,
    pub size: u64,
    pub mimetype: String,
}

impl UploadImageResponse {
    pub fn new(image: StoredImage, url: String) -> Self {
        Self {
            success: true,
            message: "Image uploaded successfully".to_string(),
            filename: image.filename,
            url,
            size: image.size,
            mimetype: image.mime_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub filename: String,
    pub url: String,
    pub size: u64,
    pub mimetype: String,
}

impl UploadedImage {
    pub fn new(image: StoredImage, url: String) -> Self {
        Self {
            filename: image.filename,
            url,
            size: image.size,
            mimetype: image.mime_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadImagesResponse {
    pub success: bool,
    pub message: String,
    pub images: Vec<UploadedImage>,
    pub count: usize,
    /// Omitted when every file was accepted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedFile>,
}

impl UploadImagesResponse {
    pub fn new(images: Vec<UploadedImage>, rejected: Vec<RejectedFile>) -> Self {
        Self {
            success: true,
            message: "Images uploaded successfully".to_string(),
            count: images.len(),
            images,
            rejected,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListedImage {
    pub filename: String,
    pub url: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ListImagesResponse {
    pub success: bool,
    pub count: usize,
    pub images: Vec<ListedImage>,
}

impl From<Vec<ListedImage>> for ListImagesResponse {
    fn from(images: Vec<ListedImage>) -> Self {
        Self {
            success: true,
            count: images.len(),
            images,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteImageResponse {
    pub success: bool,
    pub message: String,
}
