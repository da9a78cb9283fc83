//! Repository for the `tasks` table.

use sqlx::PgPool;
use taskmgmt_core::types::DbId;

use crate::models::task::{CreateTask, StatusTaskCount, Task};

const COLUMNS: &str = "id, project_id, status_id, title, description, assignee, \
                       completed, created_by, created_at, updated_at";

/// Provides task creation, lookup and status aggregation.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, status_id, title, description, assignee, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(input.status_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.assignee)
            .bind(&input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Task counts per status name for each listed project.
    ///
    /// Tasks without a status are not counted. Rows come back grouped by
    /// project and in status rank order.
    pub async fn count_by_status(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<StatusTaskCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusTaskCount>(
            "SELECT t.project_id, s.name AS status, COUNT(*) AS task_number
             FROM tasks t
             JOIN statuses s ON s.id = t.status_id
             WHERE t.project_id = ANY($1)
             GROUP BY t.project_id, s.id, s.name, s.rank
             ORDER BY t.project_id, s.rank, s.id",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }
}
