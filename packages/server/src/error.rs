use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by HTTP endpoints on failure.
#[derive(Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `NOT_FOUND`, `STORAGE_ERROR`, `INTERNAL_ERROR`.
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
}

/// Application-level error type.
///
/// Domain validation failures are not errors at this level: operations
/// report them as data (a list of messages) and reserve `AppError` for
/// malformed requests and infrastructure faults.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Storage(StorageError),
    Internal(String),
}

impl AppError {
    /// Map to a machine-readable code, an HTTP status, and a message
    /// safe to show callers. Internal detail is logged here, once.
    fn public_parts(self) -> (&'static str, StatusCode, String) {
        match self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => ("NOT_FOUND", StatusCode::NOT_FOUND, msg),
            AppError::Storage(StorageError::NotFound(key)) => (
                "NOT_FOUND",
                StatusCode::NOT_FOUND,
                format!("Blob {key} not found"),
            ),
            AppError::Storage(err) => {
                tracing::error!("Storage error: {err}");
                (
                    "STORAGE_ERROR",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Blob storage operation failed".into(),
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                (
                    "INTERNAL_ERROR",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".into(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, status, message) = self.public_parts();
        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl From<AppError> for async_graphql::Error {
    fn from(err: AppError) -> Self {
        use async_graphql::ErrorExtensions;

        let (code, _, message) = err.public_parts();
        async_graphql::Error::new(message).extend_with(|_, ext| ext.set("code", code))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}
