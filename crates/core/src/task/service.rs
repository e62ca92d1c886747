//! Task service
//!
//! Enforces business validation and orchestrates repository calls.

use std::sync::Arc;

use super::model::{Pagination, Task, TaskFilter, TaskStatus};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// Business logic layer over a task repository
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    /// Create a task from raw title and description.
    ///
    /// Both inputs are trimmed; the trimmed title must be non-empty.
    pub async fn create_task(&self, title: &str, description: &str) -> Result<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("title cannot be empty".to_string()));
        }

        let task = Task::new(title, description.trim());
        tracing::debug!(id = %task.id, "creating task");
        self.repo.create(task).await
    }

    /// Get a single task by id
    pub async fn get_task(&self, id: &str) -> Result<Task> {
        let id = require_id(id)?;
        self.repo.get_by_id(id).await
    }

    /// List tasks with filtering and pagination.
    ///
    /// Pagination is re-normalized here even when the caller already did,
    /// so the repository never sees out-of-range values.
    pub async fn get_tasks(
        &self,
        filter: TaskFilter,
        mut pagination: Pagination,
    ) -> Result<(Vec<Task>, usize)> {
        pagination.normalize();
        self.repo.get_all(filter, pagination).await
    }

    /// Apply a partial update to an existing task.
    ///
    /// A title or description that trims to empty leaves the stored value
    /// unchanged; blanking out a description through this path is not
    /// possible. The repository stamps `updated_at` on write.
    pub async fn update_task(
        &self,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
        status: Option<TaskStatus>,
    ) -> Result<Task> {
        let id = require_id(id)?;
        let mut task = self.repo.get_by_id(id).await?;

        if let Some(title) = title {
            let title = title.trim();
            if !title.is_empty() {
                task.title = title.to_string();
            }
        }
        if let Some(description) = description {
            let description = description.trim();
            if !description.is_empty() {
                task.description = description.to_string();
            }
        }
        if let Some(status) = status {
            task.status = status;
        }

        self.repo.update(task).await
    }

    /// Delete a task by id
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let id = require_id(id)?;
        // Existence check first; the two steps are benign since the store
        // serializes access internally.
        self.repo.get_by_id(id).await?;
        tracing::debug!(%id, "deleting task");
        self.repo.delete(id).await
    }
}

fn require_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::InvalidInput("id cannot be empty".to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::MemoryTaskStore;
    use std::collections::HashSet;
    use std::time::Duration;

    fn service() -> TaskService {
        TaskService::new(Arc::new(MemoryTaskStore::new()))
    }

    #[tokio::test]
    async fn test_create_task_trims_fields() {
        let svc = service();
        let task = svc.create_task("  Ship it  ", "  soon  ").await.unwrap();

        assert_eq!(task.title, "Ship it");
        assert_eq!(task.description, "soon");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(!task.id.is_empty());
    }

    #[tokio::test]
    async fn test_create_task_rejects_blank_title() {
        let svc = service();
        for title in ["", "   ", "\t\n"] {
            let err = svc.create_task(title, "desc").await.unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "title {title:?}");
        }

        // Nothing was stored
        let (tasks, total) = svc
            .get_tasks(TaskFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert!(tasks.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_created_ids_are_distinct() {
        let svc = service();
        let mut seen = HashSet::new();
        for i in 0..20 {
            let task = svc.create_task(&format!("task {i}"), "").await.unwrap();
            assert!(seen.insert(task.id), "duplicate id generated");
        }
    }

    #[tokio::test]
    async fn test_get_task_validates_id() {
        let svc = service();
        assert!(matches!(
            svc.get_task("").await.unwrap_err(),
            Error::InvalidInput(_)
        ));
        assert!(matches!(
            svc.get_task("   ").await.unwrap_err(),
            Error::InvalidInput(_)
        ));
        assert!(svc.get_task("never-created").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_round_trip_create_then_get() {
        let svc = service();
        let created = svc.create_task(" Title ", " Description ").await.unwrap();
        let fetched = svc.get_task(&created.id).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "Title");
        assert_eq!(fetched.description, "Description");
        assert_eq!(fetched.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_with_blank_fields_only_bumps_updated_at() {
        let svc = service();
        let created = svc.create_task("keep", "original").await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let updated = svc
            .update_task(&created.id, Some(""), Some("   "), None)
            .await
            .unwrap();

        assert_eq!(updated.title, "keep");
        assert_eq!(updated.description, "original");
        assert_eq!(updated.status, TaskStatus::Pending);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_applies_non_blank_fields() {
        let svc = service();
        let created = svc.create_task("old title", "old desc").await.unwrap();

        let updated = svc
            .update_task(
                &created.id,
                Some("  new title "),
                None,
                Some(TaskStatus::InProgress),
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "new title");
        assert_eq!(updated.description, "old desc");
        assert_eq!(updated.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_update_missing_task_mutates_nothing() {
        let svc = service();
        svc.create_task("existing", "").await.unwrap();

        let err = svc
            .update_task("no-such-id", Some("x"), None, None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let (tasks, total) = svc
            .get_tasks(TaskFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(tasks[0].title, "existing");
    }

    #[tokio::test]
    async fn test_update_validates_id() {
        let svc = service();
        let err = svc.update_task(" ", Some("t"), None, None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_delete_task() {
        let svc = service();
        let created = svc.create_task("short lived", "").await.unwrap();

        svc.delete_task(&created.id).await.unwrap();
        assert!(svc.get_task(&created.id).await.unwrap_err().is_not_found());

        assert!(svc.delete_task(&created.id).await.unwrap_err().is_not_found());
        assert!(matches!(
            svc.delete_task("").await.unwrap_err(),
            Error::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn test_get_tasks_normalizes_pagination() {
        let svc = service();
        for i in 0..3 {
            svc.create_task(&format!("task {i}"), "").await.unwrap();
        }

        // page 0 / page_size 0 fall back to defaults instead of erroring
        let (tasks, total) = svc
            .get_tasks(
                TaskFilter::default(),
                Pagination {
                    page: 0,
                    page_size: 0,
                },
            )
            .await
            .unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_listing_newest_first_via_service() {
        let svc = service();
        let mut ids = Vec::new();
        for i in 0..3 {
            ids.push(svc.create_task(&format!("task {i}"), "").await.unwrap().id);
            tokio::time::sleep(Duration::from_millis(3)).await;
        }

        let (tasks, _) = svc
            .get_tasks(TaskFilter::default(), Pagination::new(1, 3))
            .await
            .unwrap();
        let listed: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        let expected: Vec<&str> = ids.iter().rev().map(String::as_str).collect();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn test_filtered_listing_via_service() {
        let svc = service();
        let a = svc.create_task("a", "").await.unwrap();
        svc.create_task("b", "").await.unwrap();
        svc.update_task(&a.id, None, None, Some(TaskStatus::Completed))
            .await
            .unwrap();

        let filter = TaskFilter {
            status: Some(TaskStatus::Completed),
        };
        let (tasks, total) = svc.get_tasks(filter, Pagination::default()).await.unwrap();

        assert_eq!(total, 1);
        assert_eq!(tasks[0].id, a.id);
    }
}
