//! In-memory task collection
//!
//! Holds the live tasks in insertion order. Storage is copy-on-write, so a
//! snapshot handed out before a mutation never observes that mutation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::model::{FieldMode, Task, TaskId};

/// Owner of the task collection
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Arc<Vec<Task>>,
    fields: FieldMode,
    /// `None` once an id of `TaskId::MAX` has been seen
    next_id: Option<TaskId>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(FieldMode::default())
    }
}

impl TaskStore {
    /// Create an empty store validating fields with `fields`
    pub fn new(fields: FieldMode) -> Self {
        Self {
            tasks: Arc::new(Vec::new()),
            fields,
            next_id: Some(1),
        }
    }

    /// Create a store seeded with existing tasks
    pub fn with_tasks(fields: FieldMode, tasks: Vec<Task>) -> Self {
        let mut store = Self::new(fields);
        store.replace_all(tasks);
        store
    }

    pub fn fields(&self) -> FieldMode {
        self.fields
    }

    /// Current tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Shared handle to the current collection
    pub fn snapshot(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.tasks)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn allocate_id(&mut self) -> Option<TaskId> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(id)
    }

    fn observe_id(&mut self, id: TaskId) {
        let Some(next) = self.next_id else {
            return;
        };
        if id >= next {
            self.next_id = id.checked_add(1);
            if self.next_id.is_none() {
                debug!("Task id space exhausted at {}", id);
            }
        }
    }

    /// Append a new task.
    ///
    /// Returns `None` without touching the collection when the trimmed
    /// fields are rejected by the store's [`FieldMode`], or when no unused
    /// id is left.
    pub fn create(&mut self, title: &str, description: &str) -> Option<Task> {
        let Some((title, description)) = self.fields.accept(title, description) else {
            debug!("Rejected task creation with empty field");
            return None;
        };
        let Some(id) = self.allocate_id() else {
            debug!("Rejected task creation, no id left");
            return None;
        };

        let task = Task {
            id,
            title,
            description,
            completed: false,
            created_at: Utc::now(),
            owner_id: None,
        };
        Arc::make_mut(&mut self.tasks).push(task.clone());
        Some(task)
    }

    /// Flip the completion flag. Returns false if no task has `id`.
    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        let Some(idx) = self.position(id) else {
            debug!("Toggle ignored, task {} not found", id);
            return false;
        };
        let task = &mut Arc::make_mut(&mut self.tasks)[idx];
        task.completed = !task.completed;
        true
    }

    /// Replace title and description, keeping id, creation time and
    /// completion state. Returns false if rejected or not found.
    pub fn update(&mut self, id: TaskId, title: &str, description: &str) -> bool {
        let Some((title, description)) = self.fields.accept(title, description) else {
            debug!("Rejected update of task {} with empty field", id);
            return false;
        };
        let Some(idx) = self.position(id) else {
            debug!("Update ignored, task {} not found", id);
            return false;
        };

        let task = &mut Arc::make_mut(&mut self.tasks)[idx];
        task.title = title;
        task.description = description;
        true
    }

    /// Remove the task with `id`. Returns false if absent.
    pub fn delete(&mut self, id: TaskId) -> bool {
        self.remove(id).is_some()
    }

    /// Remove every completed task, keeping the order of the rest.
    /// Returns the removed tasks.
    pub fn clear_completed(&mut self) -> Vec<Task> {
        if !self.tasks.iter().any(|t| t.completed) {
            return Vec::new();
        }

        let (done, remaining): (Vec<Task>, Vec<Task>) =
            self.tasks.iter().cloned().partition(|t| t.completed);
        self.tasks = Arc::new(remaining);
        done
    }

    // ------------------------------------------------------------------
    // Reconciliation with an authoritative remote copy. No validation.
    // ------------------------------------------------------------------

    /// Replace the whole collection
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        let mut seen = HashSet::with_capacity(tasks.len());
        let tasks: Vec<Task> = tasks.into_iter().filter(|t| seen.insert(t.id)).collect();
        for task in &tasks {
            self.observe_id(task.id);
        }
        self.tasks = Arc::new(tasks);
    }

    /// Append `task`, or replace the task that already has its id
    pub fn insert(&mut self, task: Task) {
        self.observe_id(task.id);
        match self.position(task.id) {
            Some(idx) => Arc::make_mut(&mut self.tasks)[idx] = task,
            None => Arc::make_mut(&mut self.tasks).push(task),
        }
    }

    /// Replace the task with the same id. A task that is no longer in the
    /// collection is not brought back. Returns false in that case.
    pub fn apply_remote(&mut self, task: Task) -> bool {
        match self.position(task.id) {
            Some(idx) => {
                Arc::make_mut(&mut self.tasks)[idx] = task;
                true
            }
            None => {
                debug!("Dropped remote copy of task {}, no longer present", task.id);
                false
            }
        }
    }

    /// Remove and return the task with `id`
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let idx = self.position(id)?;
        Some(Arc::make_mut(&mut self.tasks).remove(idx))
    }

    /// Remove every task whose id is in `ids`. Returns how many were removed.
    pub fn remove_many(&mut self, ids: &[TaskId]) -> usize {
        let before = self.tasks.len();
        if before == 0 || ids.is_empty() {
            return 0;
        }
        let ids: HashSet<TaskId> = ids.iter().copied().collect();
        let remaining: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| !ids.contains(&t.id))
            .cloned()
            .collect();
        let removed = before - remaining.len();
        if removed > 0 {
            self.tasks = Arc::new(remaining);
        }
        removed
    }
}
