//! In-memory tasks and users
//!
//! The server side of the REST contract. Ids come from per-resource
//! counters and are never reused; nothing survives a restart.

use std::collections::BTreeMap;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use taskdeck_core::{NewUser, Task, TaskId, User, UserId, UserUpdate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Fields accepted when creating a task
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub owner_id: Option<i64>,
}

struct UserRecord {
    user: User,
    // Accepted and kept, never returned
    #[allow(dead_code)]
    password: String,
}

struct Inner {
    tasks: BTreeMap<TaskId, Task>,
    users: BTreeMap<UserId, UserRecord>,
    next_task_id: TaskId,
    next_user_id: UserId,
}

pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn require(value: &str, field: &str) -> StoreResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StoreError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(value.to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                tasks: BTreeMap::new(),
                users: BTreeMap::new(),
                next_task_id: 1,
                next_user_id: 1,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    /// All tasks, oldest first
    pub async fn list_tasks(&self) -> Vec<Task> {
        self.inner.read().await.tasks.values().cloned().collect()
    }

    pub async fn get_task(&self, id: TaskId) -> StoreResult<Task> {
        self.inner
            .read()
            .await
            .tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Task {} not found", id)))
    }

    pub async fn create_task(&self, fields: TaskFields) -> StoreResult<Task> {
        let title = require(&fields.title, "Title")?;

        let mut inner = self.inner.write().await;
        let id = inner.next_task_id;
        inner.next_task_id += 1;

        let task = Task {
            id,
            title,
            description: fields.description.trim().to_string(),
            completed: fields.completed,
            created_at: Utc::now(),
            owner_id: fields.owner_id,
        };
        inner.tasks.insert(id, task.clone());
        Ok(task)
    }

    /// Replace the editable fields; id, owner and creation time are kept
    pub async fn update_task(
        &self,
        id: TaskId,
        title: &str,
        description: &str,
        completed: bool,
    ) -> StoreResult<Task> {
        let title = require(title, "Title")?;

        let mut inner = self.inner.write().await;
        let task = inner
            .tasks
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Task {} not found", id)))?;
        task.title = title;
        task.description = description.trim().to_string();
        task.completed = completed;
        Ok(task.clone())
    }

    pub async fn delete_task(&self, id: TaskId) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("Task {} not found", id)))
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn list_users(&self) -> Vec<User> {
        self.inner
            .read()
            .await
            .users
            .values()
            .map(|r| r.user.clone())
            .collect()
    }

    pub async fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.inner
            .read()
            .await
            .users
            .get(&id)
            .map(|r| r.user.clone())
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", id)))
    }

    pub async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let name = require(&new_user.name, "Name")?;
        let email = require(&new_user.email, "Email")?;
        if new_user.password.is_empty() {
            return Err(StoreError::InvalidInput("Password cannot be empty".to_string()));
        }

        let mut inner = self.inner.write().await;
        let id = inner.next_user_id;
        inner.next_user_id += 1;

        let now = Utc::now();
        let user = User {
            id,
            name,
            email,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(
            id,
            UserRecord {
                user: user.clone(),
                password: new_user.password,
            },
        );
        Ok(user)
    }

    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> StoreResult<User> {
        let name = update.name.as_deref().map(|n| require(n, "Name")).transpose()?;
        let email = update.email.as_deref().map(|e| require(e, "Email")).transpose()?;

        let mut inner = self.inner.write().await;
        let record = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", id)))?;
        if let Some(name) = name {
            record.user.name = name;
        }
        if let Some(email) = email {
            record.user.email = email;
        }
        record.user.updated_at = Utc::now();
        Ok(record.user.clone())
    }

    pub async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", id)))
    }

    /// Tasks owned by an existing user
    pub async fn user_tasks(&self, id: UserId) -> StoreResult<Vec<Task>> {
        let inner = self.inner.read().await;
        if !inner.users.contains_key(&id) {
            return Err(StoreError::NotFound(format!("User {} not found", id)));
        }
        Ok(inner
            .tasks
            .values()
            .filter(|t| t.owner_id == Some(id))
            .cloned()
            .collect())
    }
}
