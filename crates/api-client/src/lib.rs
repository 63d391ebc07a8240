//! Taskdeck client - REST transport and remote reconciliation
//!
//! This crate connects the core state model to the tasks and users
//! resources: the API seams, a reqwest implementation, and controllers that
//! apply server results to local state.

mod api;
mod app;
mod config;
mod error;
mod http;
mod sync;
mod users;

#[cfg(test)]
mod testing;

pub use api::{NewTask, TaskApi, TaskUpdate, UserApi};
pub use app::SyncedTodoApp;
pub use config::{ClientConfig, Session, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{ClientError, Result};
pub use http::HttpClient;
pub use sync::{ClearOutcome, Reconcile, RemoteSync};
pub use users::UserDirectory;
