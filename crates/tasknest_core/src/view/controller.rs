//! View controller: navigation plus add/rename/edit/delete flows.
//!
//! # Invariants
//! - Initial view is [`View::Project`] with an existing project selected.
//! - `current_index` stays within `0..projects.len()`.
//! - After a delete, the selection always names an existing project.

use crate::ids::IdSource;
use crate::model::project::{Project, ProjectId, DEFAULT_PROJECT_ID};
use crate::model::todo::TodoItem;
use crate::service::store::Store;
use crate::storage::kv_store::KeyValueStore;
use crate::view::input::{RenameDraft, TextInput, TodoDraft};
use log::{debug, warn};

/// Which of the two screens is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Project list.
    #[default]
    Project,
    /// Todo list of the selected project.
    Task,
}

/// UI-only state driving what a presentation layer renders.
#[derive(Debug, Clone)]
pub struct ViewController {
    view: View,
    selected_project_id: ProjectId,
    current_index: usize,
    pending_delete: Option<ProjectId>,
    rename: Option<RenameDraft>,
    add_project: TextInput,
    add_todo: TextInput,
    todo_edit: Option<TodoDraft>,
}

impl ViewController {
    /// Starts on the project list with a selection that exists in `store`:
    /// the Default project when present, otherwise the first project.
    pub fn for_store<K: KeyValueStore, I: IdSource>(store: &Store<K, I>) -> Self {
        let (selected_project_id, current_index) = initial_selection(store)
            .unwrap_or_else(|| (DEFAULT_PROJECT_ID.to_string(), 0));
        Self {
            view: View::Project,
            selected_project_id,
            current_index,
            pending_delete: None,
            rename: None,
            add_project: TextInput::default(),
            add_todo: TextInput::default(),
            todo_edit: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_project_id(&self) -> &str {
        &self.selected_project_id
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn rename_draft(&self) -> Option<&RenameDraft> {
        self.rename.as_ref()
    }

    pub fn todo_draft(&self) -> Option<&TodoDraft> {
        self.todo_edit.as_ref()
    }

    pub fn add_project_input(&self) -> &TextInput {
        &self.add_project
    }

    pub fn add_todo_input(&self) -> &TextInput {
        &self.add_todo
    }

    pub fn selected_project<'s, K: KeyValueStore, I: IdSource>(
        &self,
        store: &'s Store<K, I>,
    ) -> Option<&'s Project> {
        store.project(&self.selected_project_id)
    }

    /// Todos shown by the task view, in insertion order.
    pub fn visible_todos<'s, K: KeyValueStore, I: IdSource>(
        &self,
        store: &'s Store<K, I>,
    ) -> Vec<&'s TodoItem> {
        store
            .todos()
            .iter()
            .filter(|todo| todo.belongs_to(&self.selected_project_id))
            .collect()
    }

    /// `(completed, incomplete)` for the selected project.
    pub fn progress<K: KeyValueStore, I: IdSource>(&self, store: &Store<K, I>) -> (usize, usize) {
        store.count_by_completion(&self.selected_project_id)
    }

    /// Opens the task view for `project_id`. Unknown ids are ignored.
    pub fn select_project<K: KeyValueStore, I: IdSource>(
        &mut self,
        store: &Store<K, I>,
        project_id: &str,
    ) {
        let Some(index) = store.project_index(project_id) else {
            warn!("event=view_select module=view status=noop reason=unknown_project project_id={project_id}");
            return;
        };
        self.current_index = index;
        self.selected_project_id = project_id.to_string();
        self.view = View::Task;
    }

    pub fn back(&mut self) {
        self.view = View::Project;
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_next<K: KeyValueStore, I: IdSource>(&self, store: &Store<K, I>) -> bool {
        self.current_index + 1 < store.projects().len()
    }

    pub fn previous_project<K: KeyValueStore, I: IdSource>(&mut self, store: &Store<K, I>) {
        if self.can_go_previous() {
            self.move_to(store, self.current_index - 1);
        }
    }

    pub fn next_project<K: KeyValueStore, I: IdSource>(&mut self, store: &Store<K, I>) {
        if self.can_go_next(store) {
            self.move_to(store, self.current_index + 1);
        }
    }

    pub fn request_delete(&mut self, project_id: impl Into<ProjectId>) {
        self.pending_delete = Some(project_id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the pending project (and its todos) and repairs selection.
    pub fn confirm_delete<K: KeyValueStore, I: IdSource>(&mut self, store: &mut Store<K, I>) {
        let Some(project_id) = self.pending_delete.take() else {
            return;
        };
        store.delete_project(&project_id);

        if project_id == self.selected_project_id {
            match initial_selection(store) {
                Some((id, index)) => {
                    self.selected_project_id = id;
                    self.current_index = index;
                }
                None => {
                    self.selected_project_id = DEFAULT_PROJECT_ID.to_string();
                    self.current_index = 0;
                    self.view = View::Project;
                }
            }
        } else {
            self.resync_index(store);
        }

        if self
            .rename
            .as_ref()
            .is_some_and(|draft| draft.project_id == project_id)
        {
            self.rename = None;
        }
        if self
            .todo_edit
            .as_ref()
            .is_some_and(|draft| store.todo(&draft.todo_id).is_none())
        {
            self.todo_edit = None;
        }
    }

    /// Starts an inline rename seeded with the current project name.
    pub fn start_rename<K: KeyValueStore, I: IdSource>(
        &mut self,
        store: &Store<K, I>,
        project_id: &str,
    ) {
        if let Some(project) = store.project(project_id) {
            self.rename = Some(RenameDraft {
                project_id: project.id.clone(),
                name: project.name.clone(),
            });
        }
    }

    pub fn set_rename_text(&mut self, name: impl Into<String>) {
        if let Some(draft) = self.rename.as_mut() {
            draft.name = name.into();
        }
    }

    /// Applies the rename buffer verbatim, blank values included.
    pub fn confirm_rename<K: KeyValueStore, I: IdSource>(&mut self, store: &mut Store<K, I>) {
        if let Some(draft) = self.rename.take() {
            store.rename_project(&draft.project_id, &draft.name);
        }
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    pub fn open_add_project(&mut self) {
        self.add_project.open();
    }

    pub fn set_add_project_text(&mut self, text: impl Into<String>) {
        self.add_project.set_text(text);
    }

    pub fn cancel_add_project(&mut self) {
        self.add_project.close();
    }

    /// Creates a project from the input and makes it the selected one.
    pub fn confirm_add_project<K: KeyValueStore, I: IdSource>(
        &mut self,
        store: &mut Store<K, I>,
    ) -> Option<ProjectId> {
        let name = self.add_project.submit()?;
        let id = store.create_project(&name)?;
        if let Some(index) = store.project_index(&id) {
            self.current_index = index;
            self.selected_project_id = id.clone();
        }
        Some(id)
    }

    pub fn open_add_todo(&mut self) {
        self.add_todo.open();
    }

    pub fn set_add_todo_text(&mut self, text: impl Into<String>) {
        self.add_todo.set_text(text);
    }

    pub fn cancel_add_todo(&mut self) {
        self.add_todo.close();
    }

    /// Creates a todo in the selected project from the input.
    pub fn confirm_add_todo<K: KeyValueStore, I: IdSource>(
        &mut self,
        store: &mut Store<K, I>,
    ) -> Option<String> {
        let text = self.add_todo.submit()?;
        if store.project(&self.selected_project_id).is_none() {
            warn!(
                "event=view_add_todo module=view status=noop reason=unknown_project project_id={}",
                self.selected_project_id
            );
            return None;
        }
        store.create_todo(&text, &self.selected_project_id)
    }

    /// Starts editing a todo with buffers seeded from its current values.
    pub fn start_edit_todo<K: KeyValueStore, I: IdSource>(
        &mut self,
        store: &Store<K, I>,
        todo_id: &str,
    ) {
        match store.todo(todo_id) {
            Some(todo) => self.todo_edit = Some(TodoDraft::from_item(todo)),
            None => debug!("event=view_edit_todo module=view status=noop todo_id={todo_id}"),
        }
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.todo_edit.as_mut() {
            draft.text = text.into();
        }
    }

    pub fn set_edit_description(&mut self, description: impl Into<String>) {
        if let Some(draft) = self.todo_edit.as_mut() {
            draft.description = description.into();
        }
    }

    pub fn confirm_edit_todo<K: KeyValueStore, I: IdSource>(&mut self, store: &mut Store<K, I>) {
        if let Some(draft) = self.todo_edit.take() {
            store.update_todo(&draft.todo_id, &draft.text, &draft.description);
        }
    }

    pub fn cancel_edit_todo(&mut self) {
        self.todo_edit = None;
    }

    fn move_to<K: KeyValueStore, I: IdSource>(&mut self, store: &Store<K, I>, index: usize) {
        if let Some(project) = store.projects().get(index) {
            self.current_index = index;
            self.selected_project_id = project.id.clone();
        }
    }

    fn resync_index<K: KeyValueStore, I: IdSource>(&mut self, store: &Store<K, I>) {
        if let Some(index) = store.project_index(&self.selected_project_id) {
            self.current_index = index;
        }
    }
}

/// Default project if present, otherwise the first one, with its position.
fn initial_selection<K: KeyValueStore, I: IdSource>(
    store: &Store<K, I>,
) -> Option<(ProjectId, usize)> {
    let project = store
        .project(DEFAULT_PROJECT_ID)
        .or_else(|| store.projects().first())?;
    let index = store.project_index(&project.id)?;
    Some((project.id.clone(), index))
}
