//! # Roster Errors

use thiserror::Error;

use crate::record::RecordId;
use crate::validation::ValidationErrorSet;

pub type RosterResult<T> = Result<T, RosterError>;

/// Errors from roster operations.
///
/// Any operation returning an error has left the collection untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The draft failed validation; the field errors are attached
    #[error("Draft failed validation: {0}")]
    Invalid(ValidationErrorSet),

    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// An update was submitted without the id of the record to replace
    #[error("Draft has no record id")]
    MissingId,

    /// Mutation attempted before the initial load completed
    #[error("Roster is still loading")]
    NotHydrated,
}

impl RosterError {
    /// Field errors, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrorSet> {
        match self {
            RosterError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
