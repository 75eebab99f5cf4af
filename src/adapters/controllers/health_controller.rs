use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::config::PublicUrlPolicy;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/health
    pub async fn health_check() -> Json<HealthResponse> {
        debug!("Health check requested");

        Json(HealthResponse {
            status: "OK".to_string(),
            message: "Image server running".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// GET / when no bundled frontend is served.
    pub async fn index(State(public_url): State<PublicUrlPolicy>) -> Json<Value> {
        Json(json!({
            "success": true,
            "message": "Image hosting API",
            "urlMode": public_url.describe(),
            "endpoints": {
                "upload": "POST /api/upload",
                "uploadMultiple": "POST /api/upload-multiple",
                "list": "GET /api/images",
                "delete": "DELETE /api/image/{filename}",
                "health": "GET /api/health",
                "files": "GET /uploads/{filename}",
            },
        }))
    }
}
