//! Space (group workspace) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskmgmt_core::managers::SpaceManagers;
use taskmgmt_core::types::{DbId, Timestamp};

/// A row from the `spaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Space {
    pub id: DbId,
    pub group_id: String,
    pub pretty_name: String,
    pub display_name: String,
    pub url: Option<String>,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A space together with the usernames managing its group.
#[derive(Debug, Clone)]
pub struct SpaceWithManagers {
    pub space: Space,
    pub managers: Vec<String>,
}

impl SpaceManagers for SpaceWithManagers {
    fn manager_ids(&self) -> &[String] {
        &self.managers
    }
}

/// DTO for registering a space.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpace {
    pub group_id: String,
    pub pretty_name: String,
    pub display_name: String,
    pub url: Option<String>,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
}
