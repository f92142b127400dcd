//! # Validation Engine
//!
//! Pure mapping from a draft to field-level errors:
//! - name: required, at least two characters after trimming
//! - email: required, local@domain.tld
//! - enrolledCourse: required, and a member of the directory snapshot
//!   unless membership enforcement is turned off

mod errors;
mod form;
mod validator;

pub use errors::{Field, Issue, ValidationErrorSet};
pub use form::DraftForm;
pub use validator::{validate, DraftValidator, MIN_NAME_LEN};
