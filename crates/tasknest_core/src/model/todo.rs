//! Todo item record.
//!
//! # Invariants
//! - `project_id` is fixed at creation; there is no move operation.
//! - `completed` changes only through toggling, never through edits.

use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};

/// Opaque todo identifier.
pub type TodoId = String;

/// Single task belonging to one project.
///
/// Serialized as `projectId` to match the persisted JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub description: String,
    pub project_id: ProjectId,
}

impl TodoItem {
    /// Creates an open item with an empty description.
    pub fn new(
        id: impl Into<TodoId>,
        text: impl Into<String>,
        project_id: impl Into<ProjectId>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            description: String::new(),
            project_id: project_id.into(),
        }
    }

    pub fn belongs_to(&self, project_id: &str) -> bool {
        self.project_id == project_id
    }
}

#[cfg(test)]
mod tests {
    use super::TodoItem;

    #[test]
    fn new_item_starts_open_without_description() {
        let todo = TodoItem::new("t-1", "Buy milk", "default");
        assert!(!todo.completed);
        assert!(todo.description.is_empty());
        assert!(todo.belongs_to("default"));
    }

    #[test]
    fn serializes_project_id_in_camel_case() {
        let todo = TodoItem::new("t-1", "Buy milk", "default");
        let value = serde_json::to_value(&todo).expect("serialize");
        assert_eq!(value["projectId"], "default");
        assert_eq!(value["completed"], false);
        assert_eq!(value["description"], "");
    }
}
