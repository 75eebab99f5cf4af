use std::any::Any;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_http::cors::{Any as CorsAny, CorsLayer};
use tracing::warn;

use crate::{
    adapters::error::ErrorDetail, application::error::ApplicationError,
    domain::config::DeploymentMode,
};

/// Adds the underlying error message to 500 responses outside production.
pub async fn expose_error_details(
    State(mode): State<DeploymentMode>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if mode.is_production() {
        return response;
    }
    with_error_details(response)
}

fn with_error_details(response: Response) -> Response {
    let Some(detail) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    let body = json!({
        "success": false,
        "error": detail.message,
        "details": detail.detail,
    });
    Response::from_parts(parts, Body::from(body.to_string()))
}

/// Converts a panic in any handler into a JSON 500.
pub fn panic_handler(
    mode: DeploymentMode,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |panic: Box<dyn Any + Send + 'static>| {
        let message = if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic".to_string()
        };

        let response = ApplicationError::InternalError(message).into_response();
        if mode.is_production() {
            response
        } else {
            with_error_details(response)
        }
    }
}

/// Restricts cross-origin callers to `allowed_origins`, or allows any origin
/// when no list is configured.
pub fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let Some(allowed_origins) = allowed_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(CorsAny)
        .allow_headers(CorsAny)
}
