//! Task list controller
//!
//! One explicit state struct for the whole task view: the collection, the
//! status filter, the search text, the edit in progress and the new-task
//! inputs. Every UI event maps to one method here.

use crate::edit::EditSession;
use crate::task::{FieldMode, Task, TaskId, TaskStore};
use crate::view::{self, Filter, Projection};

/// Input field that received a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    NewTask,
    Edit,
}

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Default)]
pub struct TodoApp {
    store: TaskStore,
    filter: Filter,
    search: String,
    edit: EditSession,
    new_title: String,
    new_description: String,
}

impl TodoApp {
    pub fn new(fields: FieldMode) -> Self {
        Self::with_store(TaskStore::new(fields))
    }

    pub fn with_store(store: TaskStore) -> Self {
        Self {
            store,
            filter: Filter::default(),
            search: String::new(),
            edit: EditSession::default(),
            new_title: String::new(),
            new_description: String::new(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn edit_mut(&mut self) -> &mut EditSession {
        &mut self.edit
    }

    pub fn new_title(&self) -> &str {
        &self.new_title
    }

    pub fn new_description(&self) -> &str {
        &self.new_description
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.new_title = title.into();
    }

    pub fn set_new_description(&mut self, description: impl Into<String>) {
        self.new_description = description.into();
    }

    pub fn clear_new_inputs(&mut self) {
        self.new_title.clear();
        self.new_description.clear();
    }

    /// Create a task from the new-task inputs. The inputs are cleared only
    /// when the task was created.
    pub fn submit_new(&mut self) -> Option<Task> {
        let task = self.store.create(&self.new_title, &self.new_description)?;
        self.clear_new_inputs();
        Some(task)
    }

    pub fn toggle(&mut self, id: TaskId) -> bool {
        self.store.toggle_complete(id)
    }

    /// Delete a task, ending an edit that targets it
    pub fn delete(&mut self, id: TaskId) -> bool {
        if self.edit.is_editing_task(id) {
            self.edit.cancel();
        }
        self.store.delete(id)
    }

    pub fn clear_completed(&mut self) -> Vec<Task> {
        let removed = self.store.clear_completed();
        if let Some(target) = self.edit.target() {
            if removed.iter().any(|t| t.id == target) {
                self.edit.cancel();
            }
        }
        removed
    }

    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        self.edit.begin(&self.store, id)
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        self.edit.set_title(title);
    }

    pub fn set_edit_description(&mut self, description: impl Into<String>) {
        self.edit.set_description(description);
    }

    pub fn commit_edit(&mut self) -> bool {
        self.edit.commit(&mut self.store)
    }

    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    /// Enter submits the focused input; Escape abandons an edit.
    pub fn handle_key(&mut self, target: InputTarget, key: Key) {
        match (target, key) {
            (InputTarget::NewTask, Key::Enter) => {
                self.submit_new();
            }
            (InputTarget::Edit, Key::Enter) => {
                self.commit_edit();
            }
            (InputTarget::Edit, Key::Escape) => self.cancel_edit(),
            _ => {}
        }
    }

    /// Visible tasks, counts and empty-state message for the current inputs
    pub fn view(&self) -> Projection<'_> {
        view::project(self.store.tasks(), self.filter, &self.search)
    }
}
