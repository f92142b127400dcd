//! Draft validation
//!
//! Every rule runs on every call; nothing short-circuits. The result is
//! valid iff name, email and course all pass.

use std::sync::OnceLock;

use regex::Regex;

use crate::record::StudentDraft;

use super::errors::{Field, Issue, ValidationErrorSet};

/// Minimum trimmed length of a name, in characters
pub const MIN_NAME_LEN: usize = 2;

/// local@domain.tld, no whitespace in any segment
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_pattern() -> Result<&'static Regex, &'static regex::Error> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN)).as_ref()
}

/// Validates drafts against the current course directory snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DraftValidator {
    enforce_course_membership: bool,
}

impl Default for DraftValidator {
    fn default() -> Self {
        Self {
            enforce_course_membership: true,
        }
    }
}

impl DraftValidator {
    pub fn new(enforce_course_membership: bool) -> Self {
        Self {
            enforce_course_membership,
        }
    }

    /// Only require a non-empty course; membership is left to the UI
    pub fn lenient() -> Self {
        Self::new(false)
    }

    pub fn enforces_course_membership(&self) -> bool {
        self.enforce_course_membership
    }

    /// Validate `draft`, returning every field error found
    pub fn validate<S: AsRef<str>>(
        &self,
        draft: &StudentDraft,
        known_course_names: &[S],
    ) -> ValidationErrorSet {
        let mut errors = ValidationErrorSet::new();

        if let Some(issue) = check_name(&draft.name) {
            errors.insert(Field::Name, issue);
        }
        if let Some(issue) = check_email(&draft.email) {
            errors.insert(Field::Email, issue);
        }
        if let Some(issue) = self.check_course(&draft.enrolled_course, known_course_names) {
            errors.insert(Field::EnrolledCourse, issue);
        }

        errors
    }

    /// Validate a single field
    pub fn validate_field<S: AsRef<str>>(
        &self,
        field: Field,
        draft: &StudentDraft,
        known_course_names: &[S],
    ) -> Option<Issue> {
        match field {
            Field::Name => check_name(&draft.name),
            Field::Email => check_email(&draft.email),
            Field::EnrolledCourse => self.check_course(&draft.enrolled_course, known_course_names),
        }
    }

    fn check_course<S: AsRef<str>>(&self, course: &str, known: &[S]) -> Option<Issue> {
        let course = course.trim();
        if course.is_empty() {
            return Some(Issue::Required);
        }
        if self.enforce_course_membership && !known.iter().any(|k| k.as_ref() == course) {
            return Some(Issue::UnknownCourse);
        }
        None
    }
}

/// Validate with course membership enforced
pub fn validate<S: AsRef<str>>(draft: &StudentDraft, known_course_names: &[S]) -> ValidationErrorSet {
    DraftValidator::default().validate(draft, known_course_names)
}

fn check_name(name: &str) -> Option<Issue> {
    let name = name.trim();
    if name.is_empty() {
        Some(Issue::Required)
    } else if name.chars().count() < MIN_NAME_LEN {
        Some(Issue::TooShort)
    } else {
        None
    }
}

fn check_email(email: &str) -> Option<Issue> {
    let email = email.trim();
    if email.is_empty() {
        Some(Issue::Required)
    } else if !email_pattern().is_ok_and(|pattern| pattern.is_match(email)) {
        Some(Issue::InvalidFormat)
    } else {
        None
    }
}
