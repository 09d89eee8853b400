//! Storage error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unknown bucket: {0}")]
    UnknownBucket(String),

    /// A caller-supplied folder or object path is not a clean relative path.
    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Upload of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("Storage is not configured: {0}")]
    NotConfigured(String),

    #[error("Random source failed: {0}")]
    Random(String),

    #[error("Object store error: {0}")]
    Store(#[from] object_store::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
