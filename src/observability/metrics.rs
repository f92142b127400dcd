//! Counters for roster activity
//!
//! - Counters only, monotonic
//! - Reset only when the registry is created
//! - Lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Registry of roster counters.
///
/// Relaxed ordering throughout: values are exact once the caller's own
/// operations have returned, which is all the roster needs.
#[derive(Debug, Default)]
pub struct RosterMetrics {
    records_added: AtomicU64,
    records_updated: AtomicU64,
    records_removed: AtomicU64,
    drafts_rejected: AtomicU64,
    saves_succeeded: AtomicU64,
    saves_failed: AtomicU64,
    load_fallbacks: AtomicU64,
    directory_fetches: AtomicU64,
    directory_failures: AtomicU64,
}

impl RosterMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_added(&self) {
        self.records_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_removed(&self) {
        self.records_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.drafts_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_saves(&self) {
        self.saves_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_save_failures(&self) {
        self.saves_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Load returned an empty collection because the blob was absent or corrupt
    pub fn increment_load_fallbacks(&self) {
        self.load_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_directory_fetches(&self) {
        self.directory_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_directory_failures(&self) {
        self.directory_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_added: self.records_added.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_removed: self.records_removed.load(Ordering::Relaxed),
            drafts_rejected: self.drafts_rejected.load(Ordering::Relaxed),
            saves_succeeded: self.saves_succeeded.load(Ordering::Relaxed),
            saves_failed: self.saves_failed.load(Ordering::Relaxed),
            load_fallbacks: self.load_fallbacks.load(Ordering::Relaxed),
            directory_fetches: self.directory_fetches.load(Ordering::Relaxed),
            directory_failures: self.directory_failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of every counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_added: u64,
    pub records_updated: u64,
    pub records_removed: u64,
    pub drafts_rejected: u64,
    pub saves_succeeded: u64,
    pub saves_failed: u64,
    pub load_fallbacks: u64,
    pub directory_fetches: u64,
    pub directory_failures: u64,
}

impl MetricsSnapshot {
    /// Render the snapshot as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
