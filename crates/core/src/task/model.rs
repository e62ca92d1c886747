//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A managed task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task with a generated id and current timestamps.
    ///
    /// Inputs are stored as given; trimming and validation happen in the
    /// service layer before construction.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            status: TaskStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filtering options for task listing
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    /// True when the task passes the filter
    pub fn matches(&self, task: &Task) -> bool {
        match self.status {
            Some(status) => task.status == status,
            None => true,
        }
    }
}

/// Page-based windowing parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

impl Pagination {
    /// Build a pagination, silently clamping out-of-range inputs to defaults
    pub fn new(page: usize, page_size: usize) -> Self {
        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let page_size = if page_size < 1 || page_size > MAX_PAGE_SIZE {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self { page, page_size }
    }

    /// Re-apply the clamping rules in place
    pub fn normalize(&mut self) {
        *self = Self::new(self.page, self.page_size);
    }

    /// Index of the first item on this page.
    ///
    /// Saturates for huge page numbers, so any page past the end of the
    /// set lands beyond it instead of wrapping around.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
