use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::quiz::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Domain modules never pick status codes; the mapping lives here only.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported source: {0}")]
    InvalidSource(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("No readable content: {0}")]
    EmptyContent(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::InvalidSource(_) => AppError::InvalidSource(err.to_string()),
            ExtractionError::Fetch { .. } => AppError::Fetch(err.to_string()),
            ExtractionError::EmptyContent => AppError::EmptyContent(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidSource(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_SOURCE", msg.clone())
            }
            AppError::Fetch(msg) => {
                tracing::warn!("Fetch error: {msg}");
                (StatusCode::BAD_GATEWAY, "FETCH_ERROR", msg.clone())
            }
            AppError::EmptyContent(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_CONTENT",
                msg.clone(),
            ),
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    "The quiz could not be generated, please try again".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
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
