//! In-memory task storage implementation
//!
//! Holds tasks in a lock-guarded map for the lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::model::{Pagination, Task, TaskFilter};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// In-memory task store
///
/// All operations take the lock for their full read-modify-write sequence,
/// so concurrent handlers observe a serialized store.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<String, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskStore {
    async fn create(&self, task: Task) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn get_by_id(&self, id: &str) -> Result<Task> {
        let tasks = self.tasks.read().await;
        tasks
            .get(id)
            .cloned()
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    async fn get_all(
        &self,
        filter: TaskFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Task>, usize)> {
        let tasks = self.tasks.read().await;

        let mut matched: Vec<Task> = tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();

        // Newest first; id as tie-break so listing stays deterministic
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        let total = matched.len();
        let start = pagination.offset();
        if start >= total {
            return Ok((Vec::new(), total));
        }

        let end = (start + pagination.page_size).min(total);
        Ok((matched[start..end].to_vec(), total))
    }

    async fn update(&self, mut task: Task) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        if !tasks.contains_key(&task.id) {
            return Err(Error::TaskNotFound(task.id));
        }
        task.updated_at = Utc::now();
        tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        tasks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }
}
