//! Core domain logic for TaskNest.
//! This crate is the single source of truth for project/todo invariants.

pub mod db;
pub mod ids;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod view;

pub use ids::{IdSource, SequentialIdSource, UuidIdSource};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectId, DEFAULT_PROJECT_ID, DEFAULT_PROJECT_NAME};
pub use model::todo::{TodoId, TodoItem};
pub use service::store::{LoadOutcome, LoadReport, Store};
pub use storage::codec::{
    decode_projects, decode_todos, encode_projects, encode_todos, DecodeError, DecodeResult,
};
pub use storage::kv_store::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore};
pub use storage::sqlite_kv::SqliteKeyValueStore;
pub use storage::{PROJECTS_KEY, TODOS_KEY};
pub use view::controller::{View, ViewController};
pub use view::input::{RenameDraft, TextInput, TodoDraft};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
