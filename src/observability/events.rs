//! Observable roster events
//!
//! Events are explicit and typed; each has a stable upper-snake-case name.

use std::fmt;

use super::logger::Severity;

/// Observable events in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Hydration
    /// Initial load of persisted records begins
    HydrateStart,
    /// Initial load complete, controller ready
    HydrateComplete,

    // Record store
    /// Blob absent, starting from an empty collection
    StoreEmpty,
    /// Blob corrupt, starting from an empty collection
    StoreCorrupt,
    /// Collection persisted
    StoreSaved,
    /// Collection could not be persisted
    StoreSaveFailed,

    // Records
    /// Record appended
    RecordAdded,
    /// Record replaced in place
    RecordUpdated,
    /// Record removed
    RecordRemoved,
    /// Draft rejected by validation
    RecordRejected,

    // Course directory
    /// Directory fetch started
    DirectoryFetchStart,
    /// Directory fetch resolved with courses
    DirectoryFetchComplete,
    /// Directory fetch failed
    DirectoryFetchFailed,
    /// Directory fetch result discarded because a newer fetch superseded it
    DirectoryFetchStale,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::HydrateStart => "HYDRATE_BEGIN",
            Event::HydrateComplete => "HYDRATE_COMPLETE",

            Event::StoreEmpty => "STORE_EMPTY",
            Event::StoreCorrupt => "STORE_CORRUPT",
            Event::StoreSaved => "STORE_SAVED",
            Event::StoreSaveFailed => "STORE_SAVE_FAILED",

            Event::RecordAdded => "RECORD_ADDED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordRemoved => "RECORD_REMOVED",
            Event::RecordRejected => "RECORD_REJECTED",

            Event::DirectoryFetchStart => "DIRECTORY_FETCH_BEGIN",
            Event::DirectoryFetchComplete => "DIRECTORY_FETCH_COMPLETE",
            Event::DirectoryFetchFailed => "DIRECTORY_FETCH_FAILED",
            Event::DirectoryFetchStale => "DIRECTORY_FETCH_STALE",
        }
    }

    /// Severity this event is logged at.
    ///
    /// WARN for every degraded condition, including a load that fell back
    /// to an empty collection; TRACE for per-save and per-fetch chatter.
    pub fn severity(&self) -> Severity {
        match self {
            Event::StoreEmpty
            | Event::StoreCorrupt
            | Event::StoreSaveFailed
            | Event::DirectoryFetchFailed => Severity::Warn,
            Event::StoreSaved | Event::DirectoryFetchStart | Event::DirectoryFetchStale => {
                Severity::Trace
            }
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
