//! Label and label/task mapping models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskmgmt_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `labels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub color: Option<String>,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `label_task_mappings` junction table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelTaskMapping {
    pub id: DbId,
    pub label_id: DbId,
    pub task_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a label owned by the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabel {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 32))]
    pub color: Option<String>,
    pub parent_id: Option<DbId>,
}
