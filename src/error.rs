//! Application error type and its HTTP rendering.
//!
//! Client bodies are plain text and never carry internal error detail; the
//! detail is logged where the error is rendered.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or invalid request input.
    #[error("{0}")]
    Validation(String),

    /// The randomness source failed while generating a short ID.
    #[error("failed to generate short id: {0}")]
    IdGeneration(String),

    /// The write transaction or flush failed.
    #[error("failed to store link: {0}")]
    Storage(String),

    /// No link has ever been stored, so the collection does not exist.
    #[error("link collection not found")]
    CollectionMissing,

    /// The short ID is unknown.
    #[error("short link not found")]
    NotFound,

    /// Unexpected failure while reading.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::IdGeneration(_) | AppError::Storage(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::CollectionMissing | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. `None` means an empty body.
    pub fn public_message(&self) -> Option<String> {
        match self {
            AppError::Validation(message) => Some(message.clone()),
            AppError::IdGeneration(_) => Some("failed to generate short id".to_string()),
            AppError::Storage(_) => Some("failed to store link".to_string()),
            AppError::CollectionMissing => Some("link collection not found".to_string()),
            AppError::NotFound => None,
            AppError::Internal(_) => Some("internal server error".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::IdGeneration(_) | AppError::Storage(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
            }
            AppError::CollectionMissing => {
                tracing::warn!("lookup before any link was stored");
            }
            AppError::Validation(_) | AppError::NotFound => {
                tracing::debug!(error = %self, "request rejected");
            }
        }

        match self.public_message() {
            Some(message) => (status, message).into_response(),
            None => status.into_response(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::CollectionMissing => AppError::CollectionMissing,
            StoreError::Storage(reason) => AppError::Storage(reason),
            StoreError::Corrupted(reason) => AppError::Internal(reason),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        let reasons: Vec<String> = e
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| match &err.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: {}", err.code),
                })
            })
            .collect();

        AppError::Validation(format!("invalid request: {}", reasons.join(", ")))
    }
}
