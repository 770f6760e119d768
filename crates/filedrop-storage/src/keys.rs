//! Shared object key generation for storage backends.
//!
//! Key format: `{unix_millis}_{filename}`.

use chrono::Utc;

/// Generate an object key for the given (already sanitized) filename.
///
/// The millisecond timestamp prefix keeps repeated uploads of the same name
/// distinct under normal clock granularity. All backends must use this
/// format for consistency.
pub fn object_key(filename: &str) -> String {
    format!("{}_{}", Utc::now().timestamp_millis(), filename)
}
