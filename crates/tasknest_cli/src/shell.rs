//! Interactive shell: renders the current view and dispatches commands
//! to the view controller and store.

use crate::commands::{parse, Command, HELP};
use std::io::{self, BufRead, Write};
use tasknest_core::{IdSource, KeyValueStore, Store, View, ViewController};

pub struct Shell<K: KeyValueStore, I: IdSource> {
    store: Store<K, I>,
    view: ViewController,
}

impl<K: KeyValueStore, I: IdSource> Shell<K, I> {
    pub fn new(store: Store<K, I>) -> Self {
        let view = ViewController::for_store(&store);
        Self { store, view }
    }

    pub fn store(&self) -> &Store<K, I> {
        &self.store
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        let mut lines = input.lines();
        self.render(out)?;
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                writeln!(out)?;
                return Ok(());
            };

            match parse(&line) {
                Ok(Command::Quit) => return Ok(()),
                Ok(command) => {
                    if let Err(message) = self.execute(command, &mut lines, out)? {
                        writeln!(out, "{message}")?;
                    }
                }
                Err(message) => writeln!(out, "{message}")?,
            }
        }
    }

    /// Applies one command and re-renders. `run` owns quitting.
    /// The inner `Err` is a user-facing refusal.
    fn execute(
        &mut self,
        command: Command,
        lines: &mut impl Iterator<Item = io::Result<String>>,
        out: &mut impl Write,
    ) -> io::Result<Result<(), String>> {
        match command {
            Command::Show | Command::Quit => {}
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Back => self.view.back(),
            Command::Open(n) => {
                let id = match self.project_at(n) {
                    Ok(id) => id,
                    Err(message) => return Ok(Err(message)),
                };
                self.view.select_project(&self.store, &id);
            }
            Command::Next | Command::Prev if self.view.view() != View::Task => {
                return Ok(Err("open a project first".to_string()));
            }
            Command::Next => self.view.next_project(&self.store),
            Command::Prev => self.view.previous_project(&self.store),
            Command::NewProject(name) => {
                self.view.open_add_project();
                self.view.set_add_project_text(name);
                if self.view.confirm_add_project(&mut self.store).is_none() {
                    return Ok(Err("project name cannot be blank".to_string()));
                }
            }
            Command::Rename { item, name } => {
                let id = match self.project_at(item) {
                    Ok(id) => id,
                    Err(message) => return Ok(Err(message)),
                };
                self.view.start_rename(&self.store, &id);
                self.view.set_rename_text(name);
                self.view.confirm_rename(&mut self.store);
            }
            Command::DeleteProject(item) => {
                let id = match self.project_at(item) {
                    Ok(id) => id,
                    Err(message) => return Ok(Err(message)),
                };
                let (done, open) = self.store.count_by_completion(&id);
                self.view.request_delete(id.clone());
                write!(
                    out,
                    "delete project #{item} and its {} task(s)? [y/N] ",
                    done + open
                )?;
                out.flush()?;
                let answer = lines.next().transpose()?.unwrap_or_default();
                if answer.trim().eq_ignore_ascii_case("y") {
                    self.view.confirm_delete(&mut self.store);
                } else {
                    self.view.cancel_delete();
                }
            }
            Command::Add(text) => {
                if self.view.view() != View::Task {
                    return Ok(Err("open a project first".to_string()));
                }
                self.view.open_add_todo();
                self.view.set_add_todo_text(text);
                if self.view.confirm_add_todo(&mut self.store).is_none() {
                    return Ok(Err("task text cannot be blank".to_string()));
                }
            }
            Command::Toggle(item) => match self.todo_at(item) {
                Ok(id) => {
                    self.store.toggle_todo_completed(&id);
                }
                Err(message) => return Ok(Err(message)),
            },
            Command::Edit {
                item,
                text,
                description,
            } => {
                let id = match self.todo_at(item) {
                    Ok(id) => id,
                    Err(message) => return Ok(Err(message)),
                };
                self.view.start_edit_todo(&self.store, &id);
                self.view.set_edit_text(text);
                self.view.set_edit_description(description);
                self.view.confirm_edit_todo(&mut self.store);
            }
            Command::Remove(item) => match self.todo_at(item) {
                Ok(id) => {
                    self.store.delete_todo(&id);
                }
                Err(message) => return Ok(Err(message)),
            },
        }

        self.render(out)?;
        Ok(Ok(()))
    }

    fn project_at(&self, item: usize) -> Result<String, String> {
        if self.view.view() != View::Project {
            return Err("go `back` to the project list first".to_string());
        }
        self.store
            .projects()
            .get(item - 1)
            .map(|project| project.id.clone())
            .ok_or_else(|| format!("no project #{item}"))
    }

    fn todo_at(&self, item: usize) -> Result<String, String> {
        if self.view.view() != View::Task {
            return Err("open a project first".to_string());
        }
        self.view
            .visible_todos(&self.store)
            .get(item - 1)
            .map(|todo| todo.id.clone())
            .ok_or_else(|| format!("no task #{item}"))
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        match self.view.view() {
            View::Project => {
                writeln!(out, "Projects")?;
                for (index, project) in self.store.projects().iter().enumerate() {
                    let (done, open) = self.store.count_by_completion(&project.id);
                    let marker = if project.id == self.view.selected_project_id() {
                        '*'
                    } else {
                        ' '
                    };
                    writeln!(
                        out,
                        "{marker} {}. {}  ({done} done, {open} open)",
                        index + 1,
                        project.name
                    )?;
                }
            }
            View::Task => {
                let name = self
                    .view
                    .selected_project(&self.store)
                    .map_or("?", |project| project.name.as_str());
                let (done, open) = self.view.progress(&self.store);
                writeln!(
                    out,
                    "Project {}/{}: {name}  ({done} done, {open} open)",
                    self.view.current_index() + 1,
                    self.store.projects().len()
                )?;
                for (index, todo) in self.view.visible_todos(&self.store).iter().enumerate() {
                    let check = if todo.completed { 'x' } else { ' ' };
                    if todo.description.is_empty() {
                        writeln!(out, "  {}. [{check}] {}", index + 1, todo.text)?;
                    } else {
                        writeln!(
                            out,
                            "  {}. [{check}] {} - {}",
                            index + 1,
                            todo.text,
                            todo.description
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
