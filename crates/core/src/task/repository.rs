//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{Pagination, Task, TaskFilter};
use crate::Result;

/// Repository interface for task CRUD operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Store a new task. Ids are generated upstream, so an insert never fails;
    /// a colliding id overwrites the existing record.
    async fn create(&self, task: Task) -> Result<Task>;

    /// Get a task by id, failing with `TaskNotFound` if absent
    async fn get_by_id(&self, id: &str) -> Result<Task>;

    /// List tasks matching the filter, sorted by `created_at` descending,
    /// windowed by the pagination. Returns the page of tasks together with
    /// the total count of matches before pagination.
    async fn get_all(&self, filter: TaskFilter, pagination: Pagination)
        -> Result<(Vec<Task>, usize)>;

    /// Replace an existing task, stamping `updated_at`. The repository is the
    /// authoritative layer for the update timestamp.
    async fn update(&self, task: Task) -> Result<Task>;

    /// Delete a task by id, failing with `TaskNotFound` if absent
    async fn delete(&self, id: &str) -> Result<()>;
}
