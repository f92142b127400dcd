//! Field-scoped validation errors
//!
//! Validation errors are data: they are returned to the caller and shown
//! next to the offending field, never raised.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// A validated draft field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    EnrolledCourse,
}

impl Field {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::EnrolledCourse => "enrolledCourse",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// What is wrong with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    /// Empty after trimming
    Required,
    /// Shorter than the minimum after trimming
    TooShort,
    /// Not shaped like local@domain.tld
    InvalidFormat,
    /// Not in the current course directory snapshot
    UnknownCourse,
}

impl Issue {
    /// Human-readable message for `field`
    pub fn message(&self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Name, Issue::Required) => "Name is required",
            (Field::Name, _) => "Name must be at least 2 characters",
            (Field::Email, Issue::Required) => "Email is required",
            (Field::Email, _) => "Please enter a valid email address",
            (Field::EnrolledCourse, Issue::Required) => "Please select a course",
            (Field::EnrolledCourse, _) => "Please select a course from the list",
        }
    }
}

/// Mapping from field to its current error.
///
/// Recomputed wholesale on every validation pass; the only partial edit
/// is clearing one field's error when that field changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    errors: BTreeMap<Field, Issue>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `issue` for `field`, replacing any earlier issue
    pub fn insert(&mut self, field: Field, issue: Issue) {
        self.errors.insert(field, issue);
    }

    /// Drop the error for one field
    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<Issue> {
        self.errors.get(&field).copied()
    }

    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|issue| issue.message(field))
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// True when no field has an error
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fields with errors, in field order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }
}

impl Serialize for ValidationErrorSet {
    /// Serializes as `{"<field>": "<message>", ...}`
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.errors
                .iter()
                .map(|(field, issue)| (field.as_str(), issue.message(*field))),
        )
    }
}

impl fmt::Display for ValidationErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, issue) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, issue.message(*field))?;
            first = false;
        }
        Ok(())
    }
}
