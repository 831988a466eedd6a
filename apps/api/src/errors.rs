use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Scoring was requested without résumé data. The caller is expected to guard this.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Render surface not available")]
    SurfaceUnavailable,

    #[error("Export already in progress")]
    ExportInProgress,

    #[error("Document error: {0}")]
    Document(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::SurfaceUnavailable => AppError::SurfaceUnavailable,
            ExportError::InProgress => AppError::ExportInProgress,
            ExportError::InvalidSurface(msg) | ExportError::Decode(msg) => {
                AppError::Validation(msg)
            }
            ExportError::Document(msg) => AppError::Document(msg),
            ExportError::Join(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Precondition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PRECONDITION_FAILED",
                msg.clone(),
            ),
            AppError::SurfaceUnavailable => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "SURFACE_UNAVAILABLE",
                "The rendered preview surface is not available for export".to_string(),
            ),
            AppError::ExportInProgress => (
                StatusCode::CONFLICT,
                "EXPORT_IN_PROGRESS",
                "Another export is still running".to_string(),
            ),
            AppError::Document(msg) => {
                tracing::error!("Document error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DOCUMENT_ERROR",
                    "The document could not be assembled".to_string(),
                )
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
