//! # Record Store Errors

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
///
/// None of these reach the controller through `load`/`save`; they are
/// logged and degraded there. The `try_*` variants expose them.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Checksum mismatch: stored {stored:08x}, computed {computed:08x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("Unsupported blob version: {0}")]
    UnsupportedVersion(u32),

    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),
}

impl StoreError {
    /// True when the blob exists but cannot be trusted
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            StoreError::Serialization(_)
                | StoreError::ChecksumMismatch { .. }
                | StoreError::UnsupportedVersion(_)
                | StoreError::DuplicateId(_)
        )
    }
}
