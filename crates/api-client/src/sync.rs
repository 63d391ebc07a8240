//! Remote reconciliation for the task collection
//!
//! Every mutation runs in two phases. The async call talks to the server and
//! borrows no local state, so other events can be handled while it is in
//! flight. Its result is a [`Reconcile`] that is then applied to the
//! [`TaskStore`] synchronously. A failed call yields an error and no
//! `Reconcile`, which leaves local state exactly as it was.

use futures::future::join_all;
use tracing::{info, warn};

use taskdeck_core::{FieldMode, Task, TaskId, TaskStore};

use crate::api::{NewTask, TaskApi, TaskUpdate};
use crate::config::Session;
use crate::error::{ClientError, Result};

/// Authoritative server result to fold into the local collection
#[derive(Debug, Clone, PartialEq)]
pub enum Reconcile {
    /// Full listing replaces the collection
    Replace(Vec<Task>),
    /// Server-created task is appended
    Created(Task),
    /// Server copy replaces the local one, if it still exists
    Updated(Task),
    /// Task is gone on the server
    Removed(TaskId),
    /// Tasks gone on the server after a bulk clear
    RemovedMany(Vec<TaskId>),
}

impl Reconcile {
    pub fn apply(self, store: &mut TaskStore) {
        match self {
            Reconcile::Replace(tasks) => store.replace_all(tasks),
            Reconcile::Created(task) => store.insert(task),
            Reconcile::Updated(task) => {
                store.apply_remote(task);
            }
            Reconcile::Removed(id) => {
                store.remove(id);
            }
            Reconcile::RemovedMany(ids) => {
                store.remove_many(&ids);
            }
        }
    }
}

/// Result of a bulk clear of completed tasks
#[derive(Debug)]
pub struct ClearOutcome {
    /// Deleted on the server, or already absent there
    pub removed: Vec<TaskId>,
    /// Delete failed; these tasks stay in the local collection
    pub failed: Vec<(TaskId, ClientError)>,
}

impl ClearOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<TaskId> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }

    /// Local effect of the clear. Only server-confirmed removals are applied.
    pub fn reconcile(&self) -> Reconcile {
        Reconcile::RemovedMany(self.removed.clone())
    }
}

/// Mirrors task intents to the remote resource
#[derive(Clone)]
pub struct RemoteSync<A> {
    api: A,
    session: Session,
    fields: FieldMode,
}

impl<A: TaskApi> RemoteSync<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            fields: FieldMode::TitleAndDescription,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn fields(&self) -> FieldMode {
        self.fields
    }

    fn owned_by_session(&self, task: &Task) -> bool {
        task.owner_id.is_none_or(|owner| owner == self.session.owner_id)
    }

    /// Fetch the collection, keeping only the session owner's tasks
    pub async fn load(&self) -> Result<Reconcile> {
        let tasks = self.api.list_tasks().await.inspect_err(|e| {
            warn!("Failed to load tasks: {}", e);
        })?;
        let total = tasks.len();
        let owned: Vec<Task> = tasks
            .into_iter()
            .filter(|t| self.owned_by_session(t))
            .collect();
        info!("Loaded {} of {} tasks for owner {}", owned.len(), total, self.session.owner_id);
        Ok(Reconcile::Replace(owned))
    }

    /// Create a task remotely. `Ok(None)` when a field is empty; no request
    /// is made in that case.
    pub async fn create(&self, title: &str, description: &str) -> Result<Option<Reconcile>> {
        let Some((title, description)) = self.fields.accept(title, description) else {
            return Ok(None);
        };

        let body = NewTask {
            title,
            description,
            completed: false,
            owner_id: self.session.owner_id,
        };
        let created = self.api.create_task(&body).await.inspect_err(|e| {
            warn!("Failed to create task: {}", e);
        })?;
        Ok(Some(Reconcile::Created(created)))
    }

    /// Replace title and description. `Ok(None)` when a field is empty.
    pub async fn update(
        &self,
        task: &Task,
        title: &str,
        description: &str,
    ) -> Result<Option<Reconcile>> {
        let Some((title, description)) = self.fields.accept(title, description) else {
            return Ok(None);
        };

        let body = TaskUpdate {
            title,
            description,
            completed: task.completed,
        };
        self.put(task.id, &body).await.map(Some)
    }

    /// Flip completion
    pub async fn toggle(&self, task: &Task) -> Result<Reconcile> {
        let mut body = TaskUpdate::from_task(task);
        body.completed = !task.completed;
        self.put(task.id, &body).await
    }

    async fn put(&self, id: TaskId, body: &TaskUpdate) -> Result<Reconcile> {
        let updated = self.api.update_task(id, body).await.inspect_err(|e| {
            warn!("Failed to update task {}: {}", id, e);
        })?;
        Ok(Reconcile::Updated(updated))
    }

    /// Delete a task. A task the server no longer has counts as deleted.
    pub async fn delete(&self, id: TaskId) -> Result<Reconcile> {
        match self.api.delete_task(id).await {
            Ok(()) => Ok(Reconcile::Removed(id)),
            Err(e) if e.is_not_found() => {
                info!("Task {} already gone on server", id);
                Ok(Reconcile::Removed(id))
            }
            Err(e) => {
                warn!("Failed to delete task {}: {}", id, e);
                Err(e)
            }
        }
    }

    /// Delete every completed task in `tasks`, all requests in flight at
    /// once. Waits for every request before reporting.
    pub async fn clear_completed(&self, tasks: &[Task]) -> ClearOutcome {
        let ids: Vec<TaskId> = tasks.iter().filter(|t| t.completed).map(|t| t.id).collect();
        let results = join_all(ids.iter().map(|&id| self.delete(id))).await;

        let mut outcome = ClearOutcome {
            removed: Vec::with_capacity(ids.len()),
            failed: Vec::new(),
        };
        for (id, result) in ids.into_iter().zip(results) {
            match result {
                Ok(_) => outcome.removed.push(id),
                Err(e) => outcome.failed.push((id, e)),
            }
        }

        if !outcome.is_complete() {
            warn!(
                "Cleared {} completed tasks, {} deletes failed: {:?}",
                outcome.removed.len(),
                outcome.failed.len(),
                outcome.failed_ids()
            );
        }
        outcome
    }
}
