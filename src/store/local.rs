//! # Local Filesystem Backend
//!
//! One file per blob under a root directory. Writes go to a sibling temp
//! file that is renamed over the target, so readers never see a torn blob.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::backend::BlobBackend;
use super::errors::{StoreError, StoreResult};

/// Local filesystem blob backend
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }
}

fn map_io(err: std::io::Error, name: &str) -> StoreError {
    match err.kind() {
        ErrorKind::NotFound => StoreError::BlobNotFound(name.to_string()),
        _ => StoreError::IoError(err.to_string()),
    }
}

impl BlobBackend for LocalBackend {
    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::IoError(e.to_string()))?;

        let target = self.blob_path(name);
        let staging = self.root.join(format!("{}.json.tmp", name));

        fs::write(&staging, data).map_err(|e| map_io(e, name))?;
        fs::rename(&staging, &target).map_err(|e| map_io(e, name))
    }

    fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        fs::read(self.blob_path(name)).map_err(|e| map_io(e, name))
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        fs::remove_file(self.blob_path(name)).map_err(|e| map_io(e, name))
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.blob_path(name).exists())
    }
}
