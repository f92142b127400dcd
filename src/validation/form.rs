//! Draft form state
//!
//! Holds a draft plus the errors from its last validation pass. Editing a
//! field clears only that field's error; everything else waits for the
//! next full pass.

use crate::record::{RecordId, StudentDraft, StudentRecord};

use super::errors::{Field, ValidationErrorSet};
use super::validator::DraftValidator;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    draft: StudentDraft,
    errors: ValidationErrorSet,
}

impl DraftForm {
    /// Empty form for a new record
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated from an existing record
    pub fn edit(record: &StudentRecord) -> Self {
        Self {
            draft: StudentDraft::from(record),
            errors: ValidationErrorSet::new(),
        }
    }

    pub fn from_draft(draft: StudentDraft) -> Self {
        Self {
            draft,
            errors: ValidationErrorSet::new(),
        }
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn into_draft(self) -> StudentDraft {
        self.draft
    }

    pub fn errors(&self) -> &ValidationErrorSet {
        &self.errors
    }

    /// Id of the record being edited, if any
    pub fn editing(&self) -> Option<&RecordId> {
        self.draft.id.as_ref()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.draft.name = value.into();
        self.errors.clear(Field::Name);
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
        self.errors.clear(Field::Email);
    }

    pub fn set_enrolled_course(&mut self, value: impl Into<String>) {
        self.draft.enrolled_course = value.into();
        self.errors.clear(Field::EnrolledCourse);
    }

    pub fn set_profile_image(&mut self, value: impl Into<String>) {
        self.draft.profile_image = value.into();
    }

    /// Recompute every error. Returns true if the draft is valid.
    pub fn validate<S: AsRef<str>>(
        &mut self,
        validator: &DraftValidator,
        known_course_names: &[S],
    ) -> bool {
        self.errors = validator.validate(&self.draft, known_course_names);
        self.errors.is_valid()
    }

    /// Replace the error set, e.g. with one returned by a failed submit
    pub fn set_errors(&mut self, errors: ValidationErrorSet) {
        self.errors = errors;
    }

    /// Back to an empty new-record form
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
