use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::template::OutputFormat;

/// The only two ways document synthesis can fail.
///
/// Everything else (missing sections, junk bullets, odd formatting) degrades
/// to an absent section instead of an error.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Nothing to render: the document has no name and no content")]
    EmptyDocument,

    #[error("Failed to serialize {format} document: {message}")]
    RenderFailure {
        format: OutputFormat,
        message: String,
    },
}

impl SynthesisError {
    pub fn render(format: OutputFormat, err: impl std::fmt::Display) -> Self {
        SynthesisError::RenderFailure {
            format,
            message: err.to_string(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Synthesis(SynthesisError::EmptyDocument) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_DOCUMENT",
                "There is nothing to generate yet".to_string(),
            ),
            AppError::Synthesis(SynthesisError::RenderFailure { format, message }) => {
                tracing::error!(%format, "Render failure: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILURE",
                    format!("Could not produce the {format} document"),
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
