use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use tracing::info;

#[derive(Debug)]
pub enum AppError {
    MissingPayload,
    MalformedPayload(String),
    SignatureMismatch,
    InvalidUpload(String),
    Upstream(reqwest::Error),
    ImageHostRejected(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::MissingPayload => (
                StatusCode::BAD_REQUEST,
                "Payload is required",
                None,
            ),
            AppError::MalformedPayload(e) => (
                StatusCode::BAD_REQUEST,
                "Invalid base64 or JSON format",
                Some(e),
            ),
            AppError::SignatureMismatch => (
                StatusCode::UNAUTHORIZED,
                "Invalid signature",
                Some("Signature verification failed".to_string()),
            ),
            AppError::InvalidUpload(e) => (
                StatusCode::BAD_REQUEST,
                "Invalid upload",
                Some(e),
            ),
            AppError::Upstream(e) => (
                StatusCode::BAD_GATEWAY,
                "Upstream request failed",
                Some(e.to_string()),
            ),
            AppError::ImageHostRejected(e) => (
                StatusCode::BAD_GATEWAY,
                "Image host rejected upload",
                Some(e),
            ),
            AppError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                Some(e),
            ),
        };

        info!("Error occurred: {} ({:?})", error, details);
        let body = match details {
            Some(details) => Json(json!({
                "error": error,
                "details": details,
            })),
            None => Json(json!({
                "error": error,
            })),
        };
        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::Upstream(error)
    }
}
