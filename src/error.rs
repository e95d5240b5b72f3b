use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Upload exceeds the 5 MiB limit")]
    PayloadTooLarge,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Invalid multipart form data")]
    Multipart(#[from] MultipartError),

    #[error("Internal Server Error")]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Database(ref e) => {
                tracing::error!("database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_owned(),
                    Some(e.to_string()),
                )
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_owned(), None),
            AppError::PayloadTooLarge => (
                StatusCode::BAD_REQUEST,
                "Upload exceeds the 5 MiB limit".to_owned(),
                None,
            ),
            AppError::StorageUnavailable(ref e) => {
                tracing::error!("storage unavailable: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage unavailable".to_owned(),
                    Some(e.clone()),
                )
            }
            AppError::Multipart(ref e) => {
                tracing::warn!("multipart rejected: {e}");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid multipart form data".to_owned(),
                    Some(e.to_string()),
                )
            }
            AppError::Anyhow(ref e) => {
                tracing::error!("unhandled error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_owned(),
                    Some(e.to_string()),
                )
            }
        };

        let body = match details {
            Some(details) => json!({ "message": message, "details": details }),
            None => json!({ "message": message }),
        };

        (status, Json(body)).into_response()
    }
}
