//! # Course Directory
//!
//! Fetches the list of valid courses from an external source and exposes
//! idle/loading/ready/failed state with retry.

mod client;
mod errors;
mod source;

pub use client::{DirectoryClient, DirectoryState};
pub use errors::{DirectoryError, DirectoryResult};
pub use source::{default_courses, CourseSource, MockCourseSource};
