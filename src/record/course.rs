//! # Course

use serde::{Deserialize, Serialize};

/// A course offered by the course directory.
///
/// Courses are sourced entirely from the directory; the roster never
/// creates or edits them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub name: String,
}

impl Course {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
