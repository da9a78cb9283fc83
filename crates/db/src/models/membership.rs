//! Group membership model.

use serde::Serialize;
use sqlx::FromRow;
use taskmgmt_core::identity::Membership;
use taskmgmt_core::types::{DbId, Timestamp};

/// A row from the `group_memberships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GroupMembership {
    pub id: DbId,
    pub username: String,
    pub group_id: String,
    pub membership_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<GroupMembership> for Membership {
    fn from(row: GroupMembership) -> Self {
        Membership::new(row.membership_type, row.group_id)
    }
}
