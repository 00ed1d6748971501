use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of an export back-end. The display text is the user-facing message;
/// the payload is the engine detail, logged but never returned to clients.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The PDF engine itself failed or panicked.
    #[error("PDF generation failed. Please try again or contact support if the issue persists.")]
    PdfEngine(String),

    /// Anything else that went wrong around PDF generation.
    #[error("An error occurred while creating the PDF. Please try again.")]
    PdfUnexpected(String),

    #[error("Word export failed. Please try again.")]
    Flow(String),
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::PdfEngine(_) => "PDF_ENGINE_ERROR",
            ExportError::PdfUnexpected(_) => "PDF_EXPORT_ERROR",
            ExportError::Flow(_) => "WORD_EXPORT_ERROR",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ExportError::PdfEngine(detail)
            | ExportError::PdfUnexpected(detail)
            | ExportError::Flow(detail) => detail,
        }
    }
}

impl From<std::fmt::Error> for ExportError {
    fn from(_: std::fmt::Error) -> Self {
        ExportError::Flow("failed to format markup".to_string())
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Export(e) => {
                tracing::error!(code = e.code(), detail = e.detail(), "Export failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.code(), e.to_string())
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
