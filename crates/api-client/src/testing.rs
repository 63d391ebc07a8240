//! In-memory stand-in for the REST resources, with failure injection

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;

use taskdeck_core::{NewUser, Task, TaskId, User, UserId, UserUpdate};

use crate::api::{NewTask, TaskApi, TaskUpdate, UserApi};
use crate::error::{ClientError, Result};

#[derive(Default)]
struct State {
    tasks: BTreeMap<TaskId, Task>,
    users: BTreeMap<UserId, User>,
    next_id: i64,
    failing: HashSet<i64>,
}

pub struct FakeApi {
    state: Mutex<State>,
    fail_all: AtomicBool,
    calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Server-assigned ids start at `first_id`
    pub fn starting_at(first_id: i64) -> Self {
        Self {
            state: Mutex::new(State {
                next_id: first_id,
                ..Default::default()
            }),
            fail_all: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn seed(&self, task: Task) {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(task.id + 1);
        state.tasks.insert(task.id, task);
    }

    pub fn seed_user(&self, name: &str, email: &str) -> User {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let now = Utc::now();
        let user = User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(id, user.clone());
        user
    }

    /// Every request fails with a server error
    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Requests that target `id` fail with a server error
    pub fn fail_on(&self, id: i64) {
        self.state.lock().unwrap().failing.insert(id);
    }

    /// Number of requests received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.state.lock().unwrap().tasks.get(&id).cloned()
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.state.lock().unwrap().users.get(&id).cloned()
    }

    fn enter(&self, target: Option<i64>) -> Result<std::sync::MutexGuard<'_, State>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        let failing = target.is_some_and(|id| state.failing.contains(&id));
        if failing || self.fail_all.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "injected failure".to_string(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let state = self.enter(None)?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        let state = self.enter(Some(id))?;
        state
            .tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::not_found(format!("/tasks/{id}")))
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let mut state = self.enter(None)?;
        let id = state.next_id;
        state.next_id += 1;
        let mut created = Task::new(id, task.title.clone(), task.description.clone())
            .with_owner(task.owner_id);
        created.completed = task.completed;
        state.tasks.insert(id, created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<Task> {
        let mut state = self.enter(Some(id))?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or_else(|| ClientError::not_found(format!("/tasks/{id}")))?;
        task.title = update.title.clone();
        task.description = update.description.clone();
        task.completed = update.completed;
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut state = self.enter(Some(id))?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ClientError::not_found(format!("/tasks/{id}")))
    }
}

#[async_trait]
impl UserApi for FakeApi {
    async fn list_users(&self) -> Result<Vec<User>> {
        let state = self.enter(None)?;
        Ok(state.users.values().cloned().collect())
    }

    async fn get_user(&self, id: UserId) -> Result<User> {
        let state = self.enter(Some(id))?;
        state
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::not_found(format!("/users/{id}")))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut state = self.enter(None)?;
        let id = state.next_id;
        state.next_id += 1;
        let now = Utc::now();
        let created = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User> {
        let mut state = self.enter(Some(id))?;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| ClientError::not_found(format!("/users/{id}")))?;
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        let mut state = self.enter(Some(id))?;
        state
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ClientError::not_found(format!("/users/{id}")))
    }

    async fn user_tasks(&self, id: UserId) -> Result<Vec<Task>> {
        let state = self.enter(Some(id))?;
        Ok(state
            .tasks
            .values()
            .filter(|t| t.owner_id == Some(id))
            .cloned()
            .collect())
    }
}
