use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Reasons shown when no usable text could be pulled out of an upload.
pub const EXTRACTION_FAILURE_REASONS: [&str; 3] = [
    "PDF is password protected",
    "PDF is corrupted",
    "No readable text found",
];

/// Remedies suggested alongside `EXTRACTION_FAILURE_REASONS`.
pub const EXTRACTION_FAILURE_REMEDIES: [&str; 2] = [
    "Convert the scanned PDF to text using a PDF editor with OCR support",
    "Use a PDF exported from a word processor such as Word or Google Docs",
];

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload exceeds the {0} byte limit")]
    PayloadTooLarge(usize),

    /// Extraction produced empty or near-empty text. Terminal for the request.
    #[error("Could not extract text from {file_name}")]
    ExtractionFailed { file_name: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
            AppError::ExtractionFailed { file_name } => {
                tracing::warn!("No usable text extracted from {file_name}");
                let body = Json(json!({
                    "error": {
                        "code": "EXTRACTION_FAILED",
                        "message": "Could not extract text from PDF.",
                        "reasons": EXTRACTION_FAILURE_REASONS,
                        "remedies": EXTRACTION_FAILURE_REMEDIES,
                    }
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
