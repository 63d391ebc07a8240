//! The single in-progress edit
//!
//! Drafts live here, apart from the store, until they are committed.

use tracing::debug;

use crate::task::{FieldMode, TaskId, TaskStore};

/// At most one task is under edit at a time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing {
        id: TaskId,
        draft_title: String,
        draft_description: String,
    },
}

/// Validated drafts handed out by [`EditSession::take_commit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    pub id: TaskId,
    pub title: String,
    pub description: String,
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    /// Id of the task under edit
    pub fn target(&self) -> Option<TaskId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { id, .. } => Some(*id),
        }
    }

    pub fn is_editing_task(&self, id: TaskId) -> bool {
        self.target() == Some(id)
    }

    /// Start editing `id`, seeding drafts from the stored task.
    ///
    /// Replaces any edit already in progress. Returns false, leaving the
    /// session as it was, if the task does not exist.
    pub fn begin(&mut self, store: &TaskStore, id: TaskId) -> bool {
        let Some(task) = store.get(id) else {
            debug!("Cannot edit task {}, not found", id);
            return false;
        };

        *self = EditSession::Editing {
            id,
            draft_title: task.title.clone(),
            draft_description: task.description.clone(),
        };
        true
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let EditSession::Editing { draft_title, .. } = self {
            *draft_title = title.into();
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        if let EditSession::Editing {
            draft_description, ..
        } = self
        {
            *draft_description = description.into();
        }
    }

    /// Validate the drafts and, if they pass, end the session and return
    /// them. Invalid drafts keep the session open.
    pub fn take_commit(&mut self, fields: FieldMode) -> Option<EditCommit> {
        let EditSession::Editing {
            id,
            draft_title,
            draft_description,
        } = self
        else {
            return None;
        };

        let Some((title, description)) = fields.accept(draft_title, draft_description) else {
            debug!("Edit of task {} kept open, empty field", id);
            return None;
        };

        let commit = EditCommit {
            id: *id,
            title,
            description,
        };
        *self = EditSession::Idle;
        Some(commit)
    }

    /// Apply the drafts to `store` and end the session.
    ///
    /// Returns false when the session is idle or a draft is empty; in the
    /// latter case the session stays open. A target deleted meanwhile still
    /// ends the session.
    pub fn commit(&mut self, store: &mut TaskStore) -> bool {
        let Some(commit) = self.take_commit(store.fields()) else {
            return false;
        };
        store.update(commit.id, &commit.title, &commit.description)
    }

    /// Drop the drafts
    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }
}
