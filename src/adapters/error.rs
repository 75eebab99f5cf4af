use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

/// Server-side detail behind a generic 500 message. Carried as a response
/// extension so it only reaches the body when the deployment mode allows it.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    pub detail: String,
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message, detail) = match self {
            ApplicationError::Validation(ref msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            ApplicationError::PayloadTooLarge { .. } => {
                warn!("File too large: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string(), None)
            }
            ApplicationError::NotFound => {
                warn!("Image not found");
                (StatusCode::NOT_FOUND, self.to_string(), None)
            }
            ApplicationError::NameCollision(ref name) => {
                error!("Generated name collided with an existing file: {}", name);
                (
                    StatusCode::CONFLICT,
                    "Upload name conflict, please retry".to_string(),
                    None,
                )
            }
            ApplicationError::NoValidFiles { ref rejected } => {
                warn!("No valid files in batch ({} rejected)", rejected.len());
                let body = Json(json!({
                    "success": false,
                    "error": self.to_string(),
                    "rejected": rejected,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ApplicationError::StorageUnavailable(ref msg) => {
                error!("Storage unavailable: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage unavailable".to_string(),
                    Some(msg.clone()),
                )
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(msg.clone()),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        let mut response = (status, body).into_response();
        if let Some(detail) = detail {
            response.extensions_mut().insert(ErrorDetail {
                message: error_message,
                detail,
            });
        }
        response
    }
}
