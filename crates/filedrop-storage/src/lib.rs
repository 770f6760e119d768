//! Filedrop Storage Library
//!
//! This crate provides the storage abstraction and implementations for
//! filedrop. It includes the Storage trait and implementations for Google
//! Cloud Storage and the local filesystem.
//!
//! # Object key format
//!
//! Every upload is stored under `{unix_millis}_{filename}`, where the
//! filename has already been sanitized by the caller. The timestamp prefix
//! keeps repeated uploads of the same filename from colliding under normal
//! clock granularity; two uploads of the same name within the same
//! millisecond overwrite each other, which is accepted.
//!
//! Keys must not contain `..` or a leading `/`. Key generation is
//! centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-gcs")]
pub mod gcs;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use filedrop_core::StorageBackend;
#[cfg(feature = "storage-gcs")]
pub use gcs::GcsStorage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
