//! Task API endpoints
//!
//! RESTful API for task CRUD operations.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use tm_core::task::{Pagination, Task, TaskFilter, TaskStatus};
use tm_core::Error;

use crate::response::{ApiResponse, Meta};
use crate::state::AppState;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    // Kept as raw strings so malformed values clamp to defaults
    // instead of failing extraction
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Parse a pagination parameter leniently; anything unparseable becomes 0,
/// which `Pagination::new` clamps to the default
fn lenient_usize(value: Option<&str>) -> usize {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

type ErrorReply = (StatusCode, Json<ApiResponse<()>>);

fn error_reply(err: Error) -> ErrorReply {
    let status = match &err {
        Error::TaskNotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ErrorReply> {
    let task = state
        .task_service()
        .create_task(&req.title, &req.description)
        .await
        .map_err(error_reply)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(task))))
}

/// GET /api/v1/tasks - List tasks with filtering and pagination
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<ApiResponse<Vec<Task>>>, ErrorReply> {
    // Absent, malformed, or out-of-range parameters fall back to the defaults
    let pagination = Pagination::new(
        lenient_usize(query.page.as_deref()),
        lenient_usize(query.page_size.as_deref()),
    );
    let filter = TaskFilter {
        status: query.status,
    };

    let (tasks, total) = state
        .task_service()
        .get_tasks(filter, pagination)
        .await
        .map_err(error_reply)?;

    let meta = Meta::new(pagination, total);
    Ok(Json(ApiResponse::success_with_meta(tasks, meta)))
}

/// GET /api/v1/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Task>>, ErrorReply> {
    let task = state
        .task_service()
        .get_task(&id)
        .await
        .map_err(error_reply)?;

    Ok(Json(ApiResponse::success(task)))
}

/// PUT /api/v1/tasks/{id} - Update a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ErrorReply> {
    let task = state
        .task_service()
        .update_task(&id, req.title.as_deref(), req.description.as_deref(), req.status)
        .await
        .map_err(error_reply)?;

    Ok(Json(ApiResponse::success(task)))
}

/// DELETE /api/v1/tasks/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ErrorReply> {
    state
        .task_service()
        .delete_task(&id)
        .await
        .map_err(error_reply)?;

    Ok(Json(ApiResponse::success(DeleteResponse {
        message: "Task deleted successfully".to_string(),
    })))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/v1/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
