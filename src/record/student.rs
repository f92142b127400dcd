//! # Student Records
//!
//! Records are created from a validated draft, at which point the id and
//! enrollment date are assigned. Updates replace every field except those two.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image used when a draft leaves the profile image empty
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placehold.co/150x150?text=Student";

/// Opaque unique identifier of a student record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A committed student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Unique within the store's collection
    pub id: RecordId,

    /// Trimmed full name
    pub name: String,

    /// Always trimmed and lower-cased
    pub email: String,

    /// Name of the enrolled course
    pub enrolled_course: String,

    /// Profile image URL, never empty
    pub profile_image: String,

    /// Set once at creation
    pub enrollment_date: DateTime<Utc>,
}

impl StudentRecord {
    /// Build a new record from a draft, normalizing its fields.
    ///
    /// The caller has already validated the draft.
    pub fn from_draft(
        draft: &StudentDraft,
        id: RecordId,
        enrollment_date: DateTime<Utc>,
        placeholder_image: &str,
    ) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            email: normalize_email(&draft.email),
            enrolled_course: draft.enrolled_course.trim().to_string(),
            profile_image: normalize_image(&draft.profile_image, placeholder_image),
            enrollment_date,
        }
    }

    /// Produce the updated version of this record.
    ///
    /// `id` and `enrollment_date` are carried over from `self`
    /// whatever the draft says.
    pub fn with_draft(&self, draft: &StudentDraft, placeholder_image: &str) -> Self {
        Self::from_draft(draft, self.id.clone(), self.enrollment_date, placeholder_image)
    }

    /// True if any of name, email or course contains `needle`.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.enrolled_course.to_lowercase().contains(needle)
    }
}

/// An unsaved, user-edited candidate record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    /// Present when editing an existing record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub enrolled_course: String,
    #[serde(default)]
    pub profile_image: String,
}

impl StudentDraft {
    /// Create a draft for a new record
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        enrolled_course: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            enrolled_course: enrolled_course.into(),
            profile_image: String::new(),
        }
    }

    /// Attach an existing record id, turning this into an edit draft
    pub fn for_record(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_profile_image(mut self, url: impl Into<String>) -> Self {
        self.profile_image = url.into();
        self
    }
}

impl From<&StudentRecord> for StudentDraft {
    fn from(record: &StudentRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            name: record.name.clone(),
            email: record.email.clone(),
            enrolled_course: record.enrolled_course.clone(),
            profile_image: record.profile_image.clone(),
        }
    }
}

/// Trim and lower-case an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn normalize_image(url: &str, placeholder: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        placeholder.to_string()
    } else {
        url.to_string()
    }
}
