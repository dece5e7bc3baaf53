//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
///
/// Corrupt or expired entries are not errors; they read as absent.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to serialize value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// The backing store failed.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}
