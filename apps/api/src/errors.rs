use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::{StoreError, StoreErrorKind};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Unexpected store response: {0}")]
    Decode(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err.kind {
            StoreErrorKind::Validation => AppError::Validation(err.message),
            StoreErrorKind::NotFound => AppError::NotFound(err.message),
            StoreErrorKind::Conflict => AppError::Conflict(err.message),
            StoreErrorKind::Unavailable => AppError::StoreUnavailable(err.message),
            StoreErrorKind::Decode => AppError::Decode(err.message),
        }
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::StoreUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE"),
            AppError::Decode(_) => (StatusCode::BAD_GATEWAY, "BAD_STORE_RESPONSE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::Conflict(msg) => msg,
            AppError::StoreUnavailable(msg) => {
                tracing::error!("Store unavailable: {msg}");
                msg
            }
            AppError::Decode(msg) => {
                tracing::error!("Unexpected store response: {msg}");
                msg
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
