use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::UploadError;
use crate::extract::{
    extract_multipart_file, sanitize_filename, validate_content_type, validate_file_size,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_url: String,
    pub metadata: FileMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub original_name: String,
    pub mime_type: String,
    /// Size in kilobytes, rendered with two decimals.
    #[serde(rename = "sizeKB")]
    pub size_kb: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Upload file handler
///
/// Buffers the single `file` field of the multipart form, validates its
/// content type and size, writes it to storage under a timestamped key, and
/// reports the public URL. The storage write is awaited to completion before
/// any response is emitted; validation failures never reach storage.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    let (data, original_filename, content_type) = extract_multipart_file(multipart).await?;

    validate_content_type(&content_type, &state.upload.allowed_content_types)?;
    validate_file_size(data.len(), state.upload.max_file_size)?;

    let safe_filename = sanitize_filename(&original_filename);
    let file_size = data.len();

    tracing::info!(
        filename = %safe_filename,
        content_type = %content_type,
        file_size = file_size,
        "Processing upload"
    );

    let (key, file_url) = state
        .storage
        .upload(&safe_filename, &content_type, data)
        .await?;

    tracing::info!(key = %key, file_url = %file_url, "Upload to storage successful");

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_url,
        metadata: FileMetadata {
            original_name: original_filename,
            mime_type: content_type,
            size_kb: format!("{:.2}", file_size as f64 / 1024.0),
            uploaded_at: Utc::now(),
        },
    }))
}
