//! Repository for the `labels` table.

use sqlx::PgPool;
use taskmgmt_core::types::DbId;

use crate::models::label::{CreateLabel, Label};

const COLUMNS: &str = "id, username, name, color, parent_id, created_at, updated_at";

/// Provides label CRUD scoped to an owning user.
pub struct LabelRepo;

impl LabelRepo {
    /// Insert a label owned by `username`.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        input: &CreateLabel,
    ) -> Result<Label, sqlx::Error> {
        let query = format!(
            "INSERT INTO labels (username, name, color, parent_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Label>(&query)
            .bind(username)
            .bind(&input.name)
            .bind(&input.color)
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    /// Find a label by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Label>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM labels WHERE id = $1");
        sqlx::query_as::<_, Label>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Labels owned by a user, ordered by name.
    pub async fn list_by_user(pool: &PgPool, username: &str) -> Result<Vec<Label>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM labels WHERE username = $1 ORDER BY name, id");
        sqlx::query_as::<_, Label>(&query)
            .bind(username)
            .fetch_all(pool)
            .await
    }
}
