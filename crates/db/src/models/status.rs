//! Workflow status model.

use serde::Serialize;
use sqlx::FromRow;
use taskmgmt_core::types::{DbId, Timestamp};

/// A row from the `statuses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub rank: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
