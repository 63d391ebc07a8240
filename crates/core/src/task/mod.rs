//! Task module
//!
//! This module contains task-related types and the in-memory store.

mod model;
mod store;

pub use model::*;
pub use store::TaskStore;
