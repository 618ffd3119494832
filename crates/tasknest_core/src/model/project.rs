//! Project record.
//!
//! # Invariants
//! - `id` is immutable after creation.
//! - The first-run collection holds exactly one project with id
//!   [`DEFAULT_PROJECT_ID`].

use serde::{Deserialize, Serialize};

/// Opaque project identifier.
pub type ProjectId = String;

/// Fixed id of the project seeded on first run.
pub const DEFAULT_PROJECT_ID: &str = "default";
/// Display name of the seeded project.
pub const DEFAULT_PROJECT_NAME: &str = "Default";

/// Named grouping that owns zero or more todo items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// User-editable display name. May be empty after a rename.
    pub name: String,
}

impl Project {
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns the project every fresh store starts with.
    pub fn default_project() -> Self {
        Self::new(DEFAULT_PROJECT_ID, DEFAULT_PROJECT_NAME)
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_PROJECT_ID
    }
}
