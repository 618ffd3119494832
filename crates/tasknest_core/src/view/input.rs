//! Small input-buffer types backing add/rename/edit forms.

use crate::model::project::ProjectId;
use crate::model::todo::{TodoId, TodoItem};

/// Toggleable single-line input used by the add-project and add-todo forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    visible: bool,
    buffer: String,
}

impl TextInput {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Replaces buffer contents. Ignored while the input is hidden.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.visible {
            self.buffer = text.into();
        }
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.buffer.clear();
    }

    /// Closes the input and yields its text when it has non-blank content.
    pub fn submit(&mut self) -> Option<String> {
        if !self.visible {
            return None;
        }
        let text = std::mem::take(&mut self.buffer);
        self.visible = false;
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Inline rename in progress for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDraft {
    pub project_id: ProjectId,
    pub name: String,
}

/// Todo edit in progress, seeded from the item's current values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub todo_id: TodoId,
    pub text: String,
    pub description: String,
}

impl TodoDraft {
    pub fn from_item(todo: &TodoItem) -> Self {
        Self {
            todo_id: todo.id.clone(),
            text: todo.text.clone(),
            description: todo.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TextInput;

    #[test]
    fn hidden_input_ignores_text_and_submit() {
        let mut input = TextInput::default();
        input.set_text("ignored");
        assert_eq!(input.text(), "");
        assert_eq!(input.submit(), None);
    }

    #[test]
    fn blank_submit_closes_without_value() {
        let mut input = TextInput::default();
        input.open();
        input.set_text("   ");
        assert_eq!(input.submit(), None);
        assert!(!input.is_visible());
        assert_eq!(input.text(), "");
    }

    #[test]
    fn submit_returns_untrimmed_text() {
        let mut input = TextInput::default();
        input.open();
        input.set_text(" Groceries ");
        assert_eq!(input.submit().as_deref(), Some(" Groceries "));
    }
}
