//! Project/todo store: single source of truth for durable state.
//!
//! # Responsibility
//! - Hold the in-memory project and todo collections.
//! - Persist the full affected collection after every state change.
//! - Recover from unreadable persisted data by falling back to defaults.
//!
//! # Invariants
//! - No todo references a project that was deleted through this store.
//! - The project collection is never empty after an operation returns.
//! - Operations on unknown ids are no-ops and write nothing.
//! - Storage failures are logged and never undo in-memory changes.

use crate::ids::IdSource;
use crate::model::project::{Project, ProjectId};
use crate::model::todo::{TodoId, TodoItem};
use crate::storage::codec::{
    decode_projects, decode_todos, encode_projects, encode_todos, DecodeError,
};
use crate::storage::kv_store::KeyValueStore;
use crate::storage::{PROJECTS_KEY, TODOS_KEY};
use log::{debug, error, info, warn};

/// How one collection was obtained during [`Store::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Persisted value decoded successfully.
    Loaded,
    /// Key was absent; default value used.
    Absent,
    /// Backend read failed; default value used.
    ReadFailed(String),
    /// Persisted value failed validation; default value used.
    Corrupt(DecodeError),
}

impl LoadOutcome {
    pub fn used_fallback(&self) -> bool {
        !matches!(self, Self::Loaded)
    }
}

/// Per-key result of store initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub projects: LoadOutcome,
    pub todos: LoadOutcome,
}

/// Durable state owner, generic over its storage and id ports.
pub struct Store<K: KeyValueStore, I: IdSource> {
    kv: K,
    ids: I,
    projects: Vec<Project>,
    todos: Vec<TodoItem>,
    load_report: LoadReport,
    persist_failures: u64,
}

impl<K: KeyValueStore, I: IdSource> Store<K, I> {
    /// Builds a store from persisted state.
    ///
    /// Never fails: each key independently falls back to its default
    /// (a lone Default project, or no todos) when absent or unreadable.
    pub fn load(kv: K, ids: I) -> Self {
        let (mut projects, projects_outcome) =
            load_collection(&kv, PROJECTS_KEY, decode_projects, || {
                vec![Project::default_project()]
            });
        let (todos, todos_outcome) = load_collection(&kv, TODOS_KEY, decode_todos, Vec::new);

        if projects.is_empty() {
            info!("event=store_load module=store status=ok action=seed_default reason=empty_projects");
            projects.push(Project::default_project());
        }

        info!(
            "event=store_load module=store status=ok projects={} todos={}",
            projects.len(),
            todos.len()
        );

        Self {
            kv,
            ids,
            projects,
            todos,
            load_report: LoadReport {
                projects: projects_outcome,
                todos: todos_outcome,
            },
            persist_failures: 0,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn project_index(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|project| project.id == id)
    }

    pub fn todo(&self, id: &str) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Todos of one project in insertion order.
    pub fn todos_for_project<'a>(
        &'a self,
        project_id: &'a str,
    ) -> impl Iterator<Item = &'a TodoItem> + 'a {
        self.todos
            .iter()
            .filter(move |todo| todo.belongs_to(project_id))
    }

    /// Returns `(completed, incomplete)` counts for one project.
    pub fn count_by_completion(&self, project_id: &str) -> (usize, usize) {
        self.todos_for_project(project_id)
            .fold((0, 0), |(done, open), todo| match todo.completed {
                true => (done + 1, open),
                false => (done, open + 1),
            })
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Number of writes that failed since this store was loaded.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }

    pub fn into_backend(self) -> K {
        self.kv
    }

    /// Creates a project and returns its id, or `None` for a blank name.
    pub fn create_project(&mut self, name: &str) -> Option<ProjectId> {
        if name.trim().is_empty() {
            debug!("event=project_create module=store status=rejected reason=blank_name");
            return None;
        }

        let project = Project::new(self.ids.next_id(), name);
        let id = project.id.clone();
        self.projects.push(project);
        info!("event=project_create module=store status=ok project_id={id}");
        self.persist_projects();
        Some(id)
    }

    /// Replaces a project name verbatim. Blank names are accepted here.
    pub fn rename_project(&mut self, id: &str, new_name: &str) -> bool {
        let Some(project) = self.projects.iter_mut().find(|project| project.id == id) else {
            debug!("event=project_rename module=store status=noop project_id={id}");
            return false;
        };

        project.name = new_name.to_string();
        info!("event=project_rename module=store status=ok project_id={id}");
        self.persist_projects();
        true
    }

    /// Deletes a project together with all of its todos.
    ///
    /// When the last project goes away a fresh Default project takes its
    /// place in the same transition.
    pub fn delete_project(&mut self, id: &str) -> bool {
        let Some(index) = self.project_index(id) else {
            debug!("event=project_delete module=store status=noop project_id={id}");
            return false;
        };

        self.projects.remove(index);
        let todos_before = self.todos.len();
        self.todos.retain(|todo| !todo.belongs_to(id));
        let removed_todos = todos_before - self.todos.len();

        let reseeded = self.projects.is_empty();
        if reseeded {
            self.projects.push(Project::default_project());
        }

        info!(
            "event=project_delete module=store status=ok project_id={id} removed_todos={removed_todos} reseeded_default={reseeded}"
        );
        self.persist_projects();
        if removed_todos > 0 {
            self.persist_todos();
        }
        true
    }

    /// Creates an open todo in `project_id`, or returns `None` for blank text.
    pub fn create_todo(&mut self, text: &str, project_id: &str) -> Option<TodoId> {
        if text.trim().is_empty() {
            debug!("event=todo_create module=store status=rejected reason=blank_text");
            return None;
        }

        let todo = TodoItem::new(self.ids.next_id(), text, project_id);
        let id = todo.id.clone();
        self.todos.push(todo);
        info!("event=todo_create module=store status=ok todo_id={id} project_id={project_id}");
        self.persist_todos();
        Some(id)
    }

    pub fn toggle_todo_completed(&mut self, id: &str) -> bool {
        let Some(todo) = self.todo_mut(id) else {
            debug!("event=todo_toggle module=store status=noop todo_id={id}");
            return false;
        };

        todo.completed = !todo.completed;
        info!(
            "event=todo_toggle module=store status=ok todo_id={id} completed={}",
            todo.completed
        );
        self.persist_todos();
        true
    }

    /// Replaces title and description. No blank check, unlike creation.
    pub fn update_todo(&mut self, id: &str, text: &str, description: &str) -> bool {
        let Some(todo) = self.todo_mut(id) else {
            debug!("event=todo_update module=store status=noop todo_id={id}");
            return false;
        };

        todo.text = text.to_string();
        todo.description = description.to_string();
        info!("event=todo_update module=store status=ok todo_id={id}");
        self.persist_todos();
        true
    }

    pub fn delete_todo(&mut self, id: &str) -> bool {
        let Some(index) = self.todos.iter().position(|todo| todo.id == id) else {
            debug!("event=todo_delete module=store status=noop todo_id={id}");
            return false;
        };

        self.todos.remove(index);
        info!("event=todo_delete module=store status=ok todo_id={id}");
        self.persist_todos();
        true
    }

    fn todo_mut(&mut self, id: &str) -> Option<&mut TodoItem> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    fn persist_projects(&mut self) {
        let encoded = encode_projects(&self.projects);
        self.write(PROJECTS_KEY, encoded);
    }

    fn persist_todos(&mut self) {
        let encoded = encode_todos(&self.todos);
        self.write(TODOS_KEY, encoded);
    }

    fn write(&mut self, key: &str, encoded: serde_json::Result<String>) {
        let result = match encoded {
            Ok(payload) => self.kv.set(key, &payload).map_err(|err| err.to_string()),
            Err(err) => Err(format!("encode failed: {err}")),
        };

        if let Err(err) = result {
            self.persist_failures += 1;
            error!(
                "event=store_persist module=store status=error key={key} failures={} error={err}",
                self.persist_failures
            );
        }
    }
}

fn load_collection<K, T>(
    kv: &K,
    key: &str,
    decode: fn(&str) -> Result<Vec<T>, DecodeError>,
    fallback: impl FnOnce() -> Vec<T>,
) -> (Vec<T>, LoadOutcome)
where
    K: KeyValueStore,
{
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=store_load module=store status=fallback key={key} reason=absent");
            return (fallback(), LoadOutcome::Absent);
        }
        Err(err) => {
            warn!("event=store_load module=store status=fallback key={key} reason=read_failed error={err}");
            return (fallback(), LoadOutcome::ReadFailed(err.to_string()));
        }
    };

    match decode(&raw) {
        Ok(items) => (items, LoadOutcome::Loaded),
        Err(err) => {
            warn!("event=store_load module=store status=fallback key={key} reason=corrupt error={err}");
            (fallback(), LoadOutcome::Corrupt(err))
        }
    }
}
