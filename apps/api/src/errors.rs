use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::corpus::CorpusError;
use crate::generation::generator::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data fault: {0}")]
    DataFault(String),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::InvalidRequest(msg) => AppError::Validation(msg),
            GenerationError::DataFault(msg) => AppError::DataFault(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::DataFault(msg) => {
                tracing::error!("Data fault: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATA_FAULT",
                    format!("Quiz generation aborted: {msg}"),
                )
            }
            AppError::Corpus(e) => {
                tracing::error!("Corpus error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CORPUS_ERROR",
                    "The verse corpus could not be read".to_string(),
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
