//! # Record Store
//!
//! The persistence boundary for the student collection. Every save rewrites
//! the whole collection; there is no incremental diffing.

use std::sync::Arc;

use crate::observability::{log_event, Event, RosterMetrics};
use crate::record::{RecordId, StudentRecord};

use super::backend::BlobBackend;
use super::blob;
use super::errors::{StoreError, StoreResult};

/// Record store over a single named blob
#[derive(Debug)]
pub struct RecordStore {
    backend: Box<dyn BlobBackend>,
    blob_name: String,
    metrics: Arc<RosterMetrics>,
}

impl RecordStore {
    pub fn new(backend: Box<dyn BlobBackend>, blob_name: impl Into<String>) -> Self {
        Self::with_metrics(backend, blob_name, Arc::new(RosterMetrics::new()))
    }

    /// Share a metrics registry with the owner of this store
    pub fn with_metrics(
        backend: Box<dyn BlobBackend>,
        blob_name: impl Into<String>,
        metrics: Arc<RosterMetrics>,
    ) -> Self {
        Self {
            backend,
            blob_name: blob_name.into(),
            metrics,
        }
    }

    pub fn blob_name(&self) -> &str {
        &self.blob_name
    }

    pub fn metrics(&self) -> &Arc<RosterMetrics> {
        &self.metrics
    }

    /// Read the persisted collection.
    ///
    /// Absent or corrupt data yields an empty collection and a logged
    /// warning; this never fails.
    pub fn load(&self) -> Vec<StudentRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(StoreError::BlobNotFound(_)) => {
                self.metrics.increment_load_fallbacks();
                log_event(Event::StoreEmpty, &[("blob", self.blob_name.as_str())]);
                Vec::new()
            }
            Err(err) => {
                self.metrics.increment_load_fallbacks();
                log_event(
                    Event::StoreCorrupt,
                    &[("blob", self.blob_name.as_str()), ("reason", err.to_string().as_str())],
                );
                Vec::new()
            }
        }
    }

    /// Read the persisted collection, surfacing why it could not be read
    pub fn try_load(&self) -> StoreResult<Vec<StudentRecord>> {
        let bytes = self.backend.read(&self.blob_name)?;
        blob::decode(&bytes)
    }

    /// Persist the full collection, overwriting prior content.
    ///
    /// Failures are logged and dropped; the caller's in-memory collection
    /// stays the only copy until the next successful save.
    pub fn save(&self, records: &[StudentRecord]) {
        if let Err(err) = self.try_save(records) {
            self.metrics.increment_save_failures();
            log_event(
                Event::StoreSaveFailed,
                &[("blob", self.blob_name.as_str()), ("reason", err.to_string().as_str())],
            );
        }
    }

    /// Persist the full collection, surfacing any failure
    pub fn try_save(&self, records: &[StudentRecord]) -> StoreResult<()> {
        let bytes = blob::encode(records)?;
        self.backend.write(&self.blob_name, &bytes)?;
        self.metrics.increment_saves();

        let count = records.len().to_string();
        log_event(
            Event::StoreSaved,
            &[("blob", self.blob_name.as_str()), ("records", count.as_str())],
        );
        Ok(())
    }

    /// Remove one record from the persisted collection.
    ///
    /// Reads the current blob, drops the record and writes the rest back.
    /// Returns the removed record.
    pub fn remove(&self, id: &RecordId) -> StoreResult<StudentRecord> {
        let mut records = self.try_load()?;
        let index = records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| StoreError::RecordNotFound(id.to_string()))?;

        let removed = records.remove(index);
        self.try_save(&records)?;
        Ok(removed)
    }

    /// Delete the persisted blob entirely
    pub fn clear(&self) -> StoreResult<()> {
        match self.backend.delete(&self.blob_name) {
            Ok(()) | Err(StoreError::BlobNotFound(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }
}
