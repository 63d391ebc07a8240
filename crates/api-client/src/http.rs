//! reqwest-backed implementation of the resource interfaces

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use taskdeck_core::{NewUser, Task, TaskId, User, UserId, UserUpdate};

use crate::api::{NewTask, TaskApi, TaskUpdate, UserApi};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// JSON-over-HTTP client for the tasks and users resources
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}{}", method, self.base_url, path);
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Map non-success statuses to errors
    async fn check(resp: Response, resource: &str) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(resource));
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.request(Method::GET, path).send().await?;
        Self::decode(Self::check(resp, path).await?).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.request(method, path).json(body).send().await?;
        Self::decode(Self::check(resp, path).await?).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let resp = self.request(Method::DELETE, path).send().await?;
        Self::check(resp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskApi for HttpClient {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.get_json("/tasks").await
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        self.get_json(&format!("/tasks/{}", id)).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let created: Task = self.send_json(Method::POST, "/tasks", task).await?;
        info!("Created task {}", created.id);
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<Task> {
        let updated = self
            .send_json(Method::PUT, &format!("/tasks/{}", id), update)
            .await?;
        info!("Updated task {}", id);
        Ok(updated)
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.delete(&format!("/tasks/{}", id)).await?;
        info!("Deleted task {}", id);
        Ok(())
    }
}

#[async_trait]
impl UserApi for HttpClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("/users").await
    }

    async fn get_user(&self, id: UserId) -> Result<User> {
        self.get_json(&format!("/users/{}", id)).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let created: User = self.send_json(Method::POST, "/users", user).await?;
        info!("Created user {}", created.id);
        Ok(created)
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User> {
        let updated = self
            .send_json(Method::PUT, &format!("/users/{}", id), update)
            .await?;
        info!("Updated user {}", id);
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        self.delete(&format!("/users/{}", id)).await?;
        info!("Deleted user {}", id);
        Ok(())
    }

    async fn user_tasks(&self, id: UserId) -> Result<Vec<Task>> {
        self.get_json(&format!("/users/{}/tasks", id)).await
    }
}
