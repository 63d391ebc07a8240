//! Core library for Taskdeck
//!
//! This crate contains the client-side state model, including:
//! - Task collection and its mutations
//! - Filtered/searched views and aggregate counts
//! - The single in-progress edit
//! - User records and the user form

pub mod app;
pub mod edit;
pub mod error;
pub mod task;
pub mod user;
pub mod view;

pub use app::{InputTarget, Key, TodoApp};
pub use edit::{EditCommit, EditSession};
pub use error::Error;
pub use task::{FieldMode, Task, TaskId, TaskStore};
pub use user::{FormMode, NewUser, User, UserForm, UserId, UserSubmission, UserUpdate};
pub use view::{EmptyState, Filter, Projection, TaskCounts};

pub type Result<T> = std::result::Result<T, Error>;
