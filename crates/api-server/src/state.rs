//! Application state

use std::sync::Arc;

use crate::store::MemoryStore;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Default)]
struct AppStateInner {
    store: MemoryStore,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get reference to the task and user store
    pub fn store(&self) -> &MemoryStore {
        &self.inner.store
    }
}
