//! HTTP error response conversion
//!
//! This module maps upload failures to their HTTP responses. The response
//! bodies are part of the service contract: client rejections for type and
//! size come back as JSON `{ "error": ... }`, while the missing-file case
//! and all server-side failures are plain text.

use axum::extract::multipart::MultipartError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filedrop_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Everything that can go wrong while handling an upload request.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no 'file' field in multipart form")]
    MissingFile,

    #[error("content type '{content_type}' is not allowed")]
    InvalidFileType { content_type: String },

    #[error("file of {size} bytes exceeds limit of {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    #[error("storage write failed: {0}")]
    Storage(#[from] StorageError),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        UploadError::Unexpected(format!("failed to read multipart body: {}", err))
    }
}

/// Log errors at a severity matched to their class: client rejections are
/// routine, backend and unexpected failures are not.
fn log_error(error: &UploadError) {
    match error {
        UploadError::MissingFile
        | UploadError::InvalidFileType { .. }
        | UploadError::FileTooLarge { .. } => {
            tracing::debug!(error = %error, "Rejected upload request");
        }
        UploadError::Storage(_) => {
            tracing::error!(error = %error, "Upload failed");
        }
        UploadError::Unexpected(_) => {
            tracing::error!(error = %error, "Unexpected error while handling upload");
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        log_error(&self);

        match self {
            UploadError::MissingFile => {
                (StatusCode::BAD_REQUEST, "Please upload a file").into_response()
            }
            UploadError::InvalidFileType { .. } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid file type. Only images, text, or PDF allowed to Upload"
                        .to_string(),
                }),
            )
                .into_response(),
            UploadError::FileTooLarge { max, .. } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("File too large. Max {}MB allowed.", max / 1024 / 1024),
                }),
            )
                .into_response(),
            UploadError::Storage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error uploading file").into_response()
            }
            UploadError::Unexpected(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
            }
        }
    }
}
