use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::documents::DocumentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest {
        message: String,
        details: Option<Value>,
    },

    #[error("Invalid file type. Allowed: .pdf, .doc, .docx")]
    UnsupportedFileType,

    #[error("File size exceeds maximum of {}MB", megabytes(.limit_bytes))]
    FileTooLarge { limit_bytes: usize },

    #[error(transparent)]
    DocumentUnreadable(#[from] DocumentError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
            details: None,
        }
    }
}

fn megabytes(bytes: &usize) -> String {
    format!("{:.0}", *bytes as f64 / (1024.0 * 1024.0))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::BadRequest { message, details } => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                Some(message.clone()),
                details.clone(),
            ),
            AppError::UnsupportedFileType => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FILE_TYPE",
                Some(self.to_string()),
                None,
            ),
            AppError::FileTooLarge { .. } => (
                StatusCode::BAD_REQUEST,
                "FILE_TOO_LARGE",
                Some(self.to_string()),
                None,
            ),
            AppError::DocumentUnreadable(e) => (
                StatusCode::BAD_REQUEST,
                "PARSING_FAILED",
                Some(e.to_string()),
                None,
            ),
            AppError::Analysis(AnalysisError::Llm(e)) => {
                tracing::error!("Ollama error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    e.code(),
                    Some("Ollama request failed".to_string()),
                    Some(Value::String(e.details())),
                )
            }
            AppError::Analysis(AnalysisError::InvalidModelOutput { message, details }) => {
                tracing::warn!("Invalid model output: {message:?}");
                // Unparseable output carries the code alone.
                let message = match (message, details) {
                    (None, None) => None,
                    (message, _) => Some(
                        message
                            .clone()
                            .unwrap_or_else(|| "Invalid model output".to_string()),
                    ),
                };
                (
                    StatusCode::BAD_GATEWAY,
                    "INVALID_MODEL_OUTPUT",
                    message,
                    details.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    Some("Internal error".to_string()),
                    None,
                )
            }
        };

        let mut error = Map::new();
        error.insert("code".to_string(), json!(code));
        if let Some(message) = message {
            error.insert("message".to_string(), json!(message));
        }
        if let Some(details) = details {
            error.insert("details".to_string(), details);
        }

        let body = Json(json!({
            "ok": false,
            "error": error
        }));

        (status, body).into_response()
    }
}
