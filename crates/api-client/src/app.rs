//! API-backed task list controller
//!
//! Same state as [`TodoApp`], but every mutation is sent to the server first
//! and applied locally only from the server's answer.
//!
//! The async methods hold `&mut self` until the server answers, so events
//! sent through them are handled one at a time. A caller that must keep
//! handling input while a request is pending takes a detached
//! [`RemoteSync`] from [`SyncedTodoApp::remote`], awaits it without
//! borrowing the app, and hands the result to [`SyncedTodoApp::apply`].

use tracing::debug;

use taskdeck_core::{Task, TaskId, TodoApp};

use crate::api::TaskApi;
use crate::config::Session;
use crate::error::Result;
use crate::sync::{ClearOutcome, Reconcile, RemoteSync};

pub struct SyncedTodoApp<A> {
    app: TodoApp,
    sync: RemoteSync<A>,
}

impl<A: TaskApi> SyncedTodoApp<A> {
    pub fn new(api: A, session: Session) -> Self {
        let sync = RemoteSync::new(api, session);
        Self {
            app: TodoApp::new(sync.fields()),
            sync,
        }
    }

    /// Local UI state: filter, search, drafts and the view
    pub fn state(&self) -> &TodoApp {
        &self.app
    }

    pub fn state_mut(&mut self) -> &mut TodoApp {
        &mut self.app
    }

    pub fn sync(&self) -> &RemoteSync<A> {
        &self.sync
    }

    /// Handle for a request that must not borrow the app while pending
    pub fn remote(&self) -> RemoteSync<A>
    where
        A: Clone,
    {
        self.sync.clone()
    }

    /// Fold a server result into the collection. An edit whose task is no
    /// longer present afterwards is cancelled.
    pub fn apply(&mut self, reconcile: Reconcile) {
        reconcile.apply(self.app.store_mut());
        if let Some(target) = self.app.edit().target() {
            if self.app.store().get(target).is_none() {
                debug!("Edit target {} removed by reconcile", target);
                self.app.cancel_edit();
            }
        }
    }

    /// Replace the collection with the server's
    pub async fn refresh(&mut self) -> Result<()> {
        let reconcile = self.sync.load().await?;
        self.apply(reconcile);
        Ok(())
    }

    /// Create a task from the new-task inputs; clears them on success.
    /// `Ok(None)` when a field is empty.
    pub async fn submit_new(&mut self) -> Result<Option<Task>> {
        let pending = self
            .sync
            .create(self.app.new_title(), self.app.new_description())
            .await?;
        let Some(reconcile) = pending else {
            return Ok(None);
        };

        let created = match &reconcile {
            Reconcile::Created(task) => Some(task.clone()),
            _ => None,
        };
        self.apply(reconcile);
        self.app.clear_new_inputs();
        Ok(created)
    }

    /// Flip completion. `Ok(false)` if the task is not in the collection.
    pub async fn toggle(&mut self, id: TaskId) -> Result<bool> {
        let Some(task) = self.app.store().get(id).cloned() else {
            debug!("Toggle ignored, task {} not found", id);
            return Ok(false);
        };
        let reconcile = self.sync.toggle(&task).await?;
        self.apply(reconcile);
        Ok(true)
    }

    /// Delete a task. `Ok(false)` if the task is not in the collection.
    pub async fn delete(&mut self, id: TaskId) -> Result<bool> {
        if self.app.store().get(id).is_none() {
            debug!("Delete ignored, task {} not found", id);
            return Ok(false);
        }
        let reconcile = self.sync.delete(id).await?;
        self.apply(reconcile);
        Ok(true)
    }

    /// Commit the edit in progress.
    ///
    /// Empty drafts keep the edit open and return `Ok(false)`. On a remote
    /// failure the edit is restored so the user can retry.
    pub async fn commit_edit(&mut self) -> Result<bool> {
        let before = self.app.edit().clone();
        let Some(commit) = self.app.edit_mut().take_commit(self.sync.fields()) else {
            return Ok(false);
        };
        let Some(task) = self.app.store().get(commit.id).cloned() else {
            debug!("Edit target {} no longer exists", commit.id);
            return Ok(false);
        };

        match self
            .sync
            .update(&task, &commit.title, &commit.description)
            .await
        {
            Ok(Some(reconcile)) => {
                self.apply(reconcile);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                *self.app.edit_mut() = before;
                Err(e)
            }
        }
    }

    /// Delete every completed task on the server, then drop locally the
    /// ones the server confirmed.
    pub async fn clear_completed(&mut self) -> ClearOutcome {
        let snapshot = self.app.store().snapshot();
        let outcome = self.sync.clear_completed(&snapshot).await;
        self.apply(outcome.reconcile());
        outcome
    }
}
