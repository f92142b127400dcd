//! roster - a locally persisted student roster
//!
//! - `store`: whole-collection persistence that degrades instead of failing
//! - `validation`: field-level draft validation
//! - `directory`: asynchronous course directory with retry
//! - `roster`: the controller tying them together

pub mod config;
pub mod directory;
pub mod observability;
pub mod record;
pub mod roster;
pub mod store;
pub mod validation;

pub use config::{ConfigError, RosterConfig};
pub use directory::{DirectoryClient, DirectoryState, MockCourseSource};
pub use record::{Course, RecordId, StudentDraft, StudentRecord};
pub use roster::{RosterController, RosterError, RosterResult};
pub use store::{LocalBackend, MemoryBackend, RecordStore};
pub use validation::{validate, DraftForm, DraftValidator, ValidationErrorSet};
