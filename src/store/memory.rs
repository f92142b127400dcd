//! # In-Memory Backend
//!
//! Used by tests and by hosts without a filesystem. A byte quota can be set
//! to exercise the degraded-save path.

use std::collections::HashMap;
use std::sync::RwLock;

use super::backend::BlobBackend;
use super::errors::{StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any write larger than `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }
}

impl BlobBackend for MemoryBackend {
    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        if let Some(quota) = self.quota {
            if data.len() > quota {
                return Err(StoreError::QuotaExceeded);
            }
        }

        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| StoreError::IoError("Lock poisoned".to_string()))?;
        blobs.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| StoreError::IoError("Lock poisoned".to_string()))?;
        blobs
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::BlobNotFound(name.to_string()))
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| StoreError::IoError("Lock poisoned".to_string()))?;
        blobs
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::BlobNotFound(name.to_string()))
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| StoreError::IoError("Lock poisoned".to_string()))?;
        Ok(blobs.contains_key(name))
    }
}
