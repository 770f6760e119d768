//! Multipart extraction and upload validation helpers

use axum::extract::Multipart;

use crate::error::UploadError;

/// Extract file data, filename, and content type from a multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
) -> Result<(Vec<u8>, String, String), UploadError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file_data.is_some() {
                return Err(UploadError::Unexpected(
                    "multiple file fields; send exactly one field named 'file'".to_string(),
                ));
            }
            filename = field.file_name().map(|s: &str| s.to_string());
            content_type = field.content_type().map(|s: &str| s.to_string());

            let data = field.bytes().await?;

            file_data = Some(data.to_vec());
        }
    }

    let file_data = file_data.ok_or(UploadError::MissingFile)?;

    let original_filename = filename.unwrap_or_else(|| "unknown".to_string());
    let content_type = content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((file_data, original_filename, content_type))
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate content type against the allow-list. Compares the normalized
/// MIME type only (no parameter bypass).
pub fn validate_content_type(
    content_type: &str,
    allowed_types: &[String],
) -> Result<(), UploadError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(UploadError::InvalidFileType {
            content_type: content_type.to_string(),
        });
    }
    Ok(())
}

/// Validate file size against the configured limit
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), UploadError> {
    if file_size > max_size {
        return Err(UploadError::FileTooLarge {
            size: file_size,
            max: max_size,
        });
    }
    Ok(())
}

/// Sanitize a client-supplied filename before it enters an object key:
/// basename only, invalid characters replaced, length capped. Degenerate
/// names collapse to "file".
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;

    let filename_only = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['.', '_']).is_empty() {
        return "file".to_string();
    }

    sanitized
}
