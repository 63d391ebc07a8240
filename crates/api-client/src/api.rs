//! Remote resource interfaces
//!
//! `TaskApi` and `UserApi` are the seams between local state and the REST
//! resources. [`HttpClient`](crate::HttpClient) is the production
//! implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use taskdeck_core::{NewUser, Task, TaskId, User, UserId, UserUpdate};

use crate::error::Result;

/// Body of `POST /tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[serde(alias = "user_id", alias = "owner_id")]
    pub owner_id: i64,
}

/// Body of `PUT /tasks/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl TaskUpdate {
    /// Current fields of `task`
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
        }
    }
}

/// Repository interface for the tasks resource
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Get all tasks
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get_task(&self, id: TaskId) -> Result<Task>;

    /// Create a task; the server assigns id and creation time
    async fn create_task(&self, task: &NewTask) -> Result<Task>;

    /// Replace a task's editable fields
    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<Task>;

    /// Delete a task by ID
    async fn delete_task(&self, id: TaskId) -> Result<()>;
}

/// Repository interface for the users resource
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn get_user(&self, id: UserId) -> Result<User>;

    async fn create_user(&self, user: &NewUser) -> Result<User>;

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User>;

    async fn delete_user(&self, id: UserId) -> Result<()>;

    /// Tasks owned by a user
    async fn user_tasks(&self, id: UserId) -> Result<Vec<Task>>;
}

#[async_trait]
impl<T: TaskApi + ?Sized> TaskApi for std::sync::Arc<T> {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        (**self).list_tasks().await
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        (**self).get_task(id).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        (**self).create_task(task).await
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<Task> {
        (**self).update_task(id, update).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        (**self).delete_task(id).await
    }
}

#[async_trait]
impl<T: UserApi + ?Sized> UserApi for std::sync::Arc<T> {
    async fn list_users(&self) -> Result<Vec<User>> {
        (**self).list_users().await
    }

    async fn get_user(&self, id: UserId) -> Result<User> {
        (**self).get_user(id).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        (**self).create_user(user).await
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User> {
        (**self).update_user(id, update).await
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        (**self).delete_user(id).await
    }

    async fn user_tasks(&self, id: UserId) -> Result<Vec<Task>> {
        (**self).user_tasks(id).await
    }
}
