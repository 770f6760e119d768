//! Application-wide constants.

/// Default upload size limit in whole megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: usize = 5;

/// Default content-type allow-list: images, plain text, and PDF.
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &str =
    "image/jpeg,image/png,text/plain,application/pdf";

/// Headroom multiplier applied to the file size limit when capping the raw
/// request body. Multipart framing adds boundary and header bytes on top of
/// the file content itself.
pub const BODY_LIMIT_MULTIPLIER: usize = 4;
