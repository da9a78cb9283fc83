//! Task model, DTOs and the per-status aggregate.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskmgmt_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub status_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub completed: bool,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: DbId,
    pub status_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub created_by: String,
}

/// Number of tasks in one status of one project.
#[derive(Debug, Clone, FromRow)]
pub struct StatusTaskCount {
    pub project_id: DbId,
    pub status: String,
    pub task_number: i64,
}
