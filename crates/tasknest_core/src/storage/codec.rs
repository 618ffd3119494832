//! JSON encoding and shape validation for persisted collections.
//!
//! # Invariants
//! - Top-level value must be an array; anything else is rejected.
//! - Every element must carry all required fields with the right types.
//! - Unknown extra fields are ignored.

use crate::model::project::Project;
use crate::model::todo::TodoItem;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Reason a persisted payload could not be turned into a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload is not valid JSON.
    Malformed(String),
    /// Payload parsed, but the top-level value is not an array.
    NotArray { found: &'static str },
    /// One array element has a missing or mistyped field.
    InvalidElement { index: usize, reason: String },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(reason) => write!(f, "malformed json: {reason}"),
            Self::NotArray { found } => write!(f, "expected array, found {found}"),
            Self::InvalidElement { index, reason } => {
                write!(f, "invalid element at index {index}: {reason}")
            }
        }
    }
}

impl Error for DecodeError {}

pub fn encode_projects(projects: &[Project]) -> serde_json::Result<String> {
    encode(projects)
}

pub fn encode_todos(todos: &[TodoItem]) -> serde_json::Result<String> {
    encode(todos)
}

pub fn decode_projects(raw: &str) -> DecodeResult<Vec<Project>> {
    decode(raw)
}

pub fn decode_todos(raw: &str) -> DecodeResult<Vec<TodoItem>> {
    decode(raw)
}

fn encode<T: Serialize>(items: &[T]) -> serde_json::Result<String> {
    serde_json::to_string(items)
}

fn decode<T: DeserializeOwned>(raw: &str) -> DecodeResult<Vec<T>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| DecodeError::Malformed(err.to_string()))?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(DecodeError::NotArray {
                found: json_kind(&other),
            })
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element).map_err(|err| DecodeError::InvalidElement {
                index,
                reason: err.to_string(),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_projects, decode_todos, encode_todos, DecodeError};
    use crate::model::todo::TodoItem;

    #[test]
    fn decodes_persisted_todo_shape() {
        let raw = r#"[{"id":"a","text":"Buy milk","completed":true,"description":"2%","projectId":"default"}]"#;
        let todos = decode_todos(raw).expect("valid payload");
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].project_id, "default");
        assert!(todos[0].completed);
    }

    #[test]
    fn encoded_todos_decode_to_equal_collection() {
        let mut done = TodoItem::new("b", "Ship", "work");
        done.completed = true;
        done.description = "friday".to_string();
        let todos = vec![TodoItem::new("a", "Plan", "work"), done];

        let raw = encode_todos(&todos).expect("encode");
        assert_eq!(decode_todos(&raw).expect("decode"), todos);
    }

    #[test]
    fn rejects_non_array_top_level() {
        let err = decode_projects(r#"{"id":"default","name":"Default"}"#).unwrap_err();
        assert_eq!(err, DecodeError::NotArray { found: "object" });
    }

    #[test]
    fn rejects_element_missing_required_field() {
        let err = decode_projects(r#"[{"id":"default","name":"Default"},{"id":"x"}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidElement { index: 1, .. }));
    }

    #[test]
    fn rejects_mistyped_field() {
        let raw = r#"[{"id":"a","text":"t","completed":"yes","description":"","projectId":"p"}]"#;
        let err = decode_todos(raw).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidElement { index: 0, .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            decode_todos("[{"),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn ignores_unknown_fields() {
        let projects =
            decode_projects(r#"[{"id":"p","name":"Home","color":"blue"}]"#).expect("extra ok");
        assert_eq!(projects[0].name, "Home");
    }
}
