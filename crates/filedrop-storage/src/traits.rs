//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (GCS, local filesystem) must implement this trait.
/// This allows the upload handler to work with any backend without coupling
/// to implementation details.
///
/// **Key format:** `{unix_millis}_{filename}`. See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a file and return (object_key, public_url)
    ///
    /// The object key is generated from the current time and the given
    /// filename; the URL is where the stored object is publicly reachable.
    /// The write is a single non-resumable put: on error no usable object
    /// exists under the returned key.
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)>;

    /// Check if an object exists
    async fn exists(&self, object_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
