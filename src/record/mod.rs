//! Roster data model
//!
//! - `StudentRecord`: a committed, persisted student
//! - `StudentDraft`: an unsaved candidate pending validation
//! - `Course`: an immutable directory entry
//! - `RecordId`: opaque unique record identity

mod course;
mod student;

pub use course::Course;
pub use student::{normalize_email, RecordId, StudentDraft, StudentRecord, DEFAULT_PLACEHOLDER_IMAGE};
