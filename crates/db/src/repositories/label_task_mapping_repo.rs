//! Repository for the `label_task_mappings` junction table.

use sqlx::PgPool;
use taskmgmt_core::types::DbId;

use crate::models::label::LabelTaskMapping;

const COLUMNS: &str = "id, label_id, task_id, created_at, updated_at";

/// Lookups and maintenance of label/task associations.
///
/// The `(label_id, task_id)` pair is unique, so
/// [`find_label_task_mapping`](Self::find_label_task_mapping) yields at
/// most one row.
pub struct LabelTaskMappingRepo;

impl LabelTaskMappingRepo {
    /// The mapping for an exact label/task pair.
    pub async fn find_label_task_mapping(
        pool: &PgPool,
        label_id: DbId,
        task_id: DbId,
    ) -> Result<Option<LabelTaskMapping>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM label_task_mappings WHERE label_id = $1 AND task_id = $2"
        );
        sqlx::query_as::<_, LabelTaskMapping>(&query)
            .bind(label_id)
            .bind(task_id)
            .fetch_optional(pool)
            .await
    }

    /// Every mapping of a label, oldest first.
    pub async fn find_by_label(
        pool: &PgPool,
        label_id: DbId,
    ) -> Result<Vec<LabelTaskMapping>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM label_task_mappings WHERE label_id = $1 ORDER BY id");
        sqlx::query_as::<_, LabelTaskMapping>(&query)
            .bind(label_id)
            .fetch_all(pool)
            .await
    }

    /// Attach a label to a task. Idempotent: re-attaching returns the
    /// existing mapping unchanged.
    pub async fn attach(
        pool: &PgPool,
        label_id: DbId,
        task_id: DbId,
    ) -> Result<LabelTaskMapping, sqlx::Error> {
        let query = format!(
            "INSERT INTO label_task_mappings (label_id, task_id)
             VALUES ($1, $2)
             ON CONFLICT (label_id, task_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, LabelTaskMapping>(&query)
            .bind(label_id)
            .bind(task_id)
            .fetch_optional(pool)
            .await?;
        match inserted {
            Some(mapping) => Ok(mapping),
            None => Self::find_label_task_mapping(pool, label_id, task_id)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    /// Detach a label from a task. Returns `true` if a mapping was removed.
    pub async fn detach(pool: &PgPool, label_id: DbId, task_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM label_task_mappings WHERE label_id = $1 AND task_id = $2")
                .bind(label_id)
                .bind(task_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
