//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use image_host::{create_router, domain::config::ServerConfig, services, AppState};
use tempfile::TempDir;

pub const HOST: &str = "localhost:5000";
pub const BOUNDARY: &str = "image-host-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub uploads: PathBuf,
    // Held so the directory outlives the test.
    _dir: TempDir,
}

pub fn test_app() -> TestApp {
    test_app_with(ServerConfig::default())
}

pub fn test_app_with(mut config: ServerConfig) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    std::fs::create_dir_all(&uploads).unwrap();
    config.uploads_dir = uploads.clone();

    let storage = services::create_storage_service(&config.uploads_dir);
    let router = create_router(AppState::new(&config, storage), &config);

    TestApp {
        router,
        uploads,
        _dir: dir,
    }
}

pub struct Part {
    pub field: &'static str,
    pub filename: &'static str,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

impl Part {
    pub fn new(
        field: &'static str,
        filename: &'static str,
        content_type: &'static str,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            field,
            filename,
            content_type,
            data: data.into(),
        }
    }
}

pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.field, part.filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn upload_request(uri: &str, parts: &[Part]) -> Request<Body> {
    Request::post(uri)
        .header(header::HOST, HOST)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap()
}

pub fn delete_request(uri: &str) -> Request<Body> {
    Request::delete(uri)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn stored_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Small but well-formed PNG signature followed by arbitrary bytes.
pub fn png_bytes() -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    data.extend((0..=255u8).cycle().take(4096));
    data
}
