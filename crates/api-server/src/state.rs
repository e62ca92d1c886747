//! Application state

use std::sync::Arc;

use tm_core::task::{MemoryTaskStore, TaskService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_service: TaskService,
}

impl AppState {
    /// Create a new AppState with a fresh in-memory store
    pub fn new() -> Self {
        let store = Arc::new(MemoryTaskStore::new());
        let task_service = TaskService::new(store);

        Self {
            inner: Arc::new(AppStateInner { task_service }),
        }
    }

    /// Get reference to the task service
    pub fn task_service(&self) -> &TaskService {
        &self.inner.task_service
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
