//! # Course Directory Errors

use thiserror::Error;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Course directory errors.
///
/// All are recoverable: a failed fetch leaves the client in `Failed`, from
/// which `retry` starts a fresh round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The source could not produce the course list
    #[error("Failed to load courses: {0}")]
    Unavailable(String),

    /// `retry` called outside the `Failed` state
    #[error("Retry is only possible after a failed fetch (state: {0})")]
    RetryNotApplicable(&'static str),
}
