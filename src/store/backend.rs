//! # Blob Backend Trait

use super::errors::StoreResult;

/// Storage for named, whole-value blobs.
///
/// Writes replace the previous content entirely.
pub trait BlobBackend: Send + Sync + std::fmt::Debug {
    /// Replace the blob's content
    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()>;

    /// Read the blob; `BlobNotFound` if it was never written
    fn read(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// Delete the blob
    fn delete(&self, name: &str) -> StoreResult<()>;

    /// Check if the blob exists
    fn exists(&self, name: &str) -> StoreResult<bool>;
}
