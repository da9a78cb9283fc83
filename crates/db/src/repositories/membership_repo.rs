//! Repository for the `group_memberships` table.

use sqlx::PgPool;
use taskmgmt_core::identity::{MEMBERSHIP_MANAGER, MEMBERSHIP_WILDCARD};

use crate::models::membership::GroupMembership;

const COLUMNS: &str = "id, username, group_id, membership_type, created_at, updated_at";

/// Provides membership grants and roster queries.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Grant a membership. Idempotent: an existing grant is returned as-is.
    pub async fn add(
        pool: &PgPool,
        username: &str,
        group_id: &str,
        membership_type: &str,
    ) -> Result<GroupMembership, sqlx::Error> {
        let query = format!(
            "INSERT INTO group_memberships (username, group_id, membership_type)
             VALUES ($1, $2, $3)
             ON CONFLICT (username, group_id, membership_type)
                 DO UPDATE SET membership_type = EXCLUDED.membership_type
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GroupMembership>(&query)
            .bind(username)
            .bind(group_id)
            .bind(membership_type)
            .fetch_one(pool)
            .await
    }

    /// Every membership held by a user.
    pub async fn list_for_user(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<GroupMembership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM group_memberships WHERE username = $1 ORDER BY group_id, id"
        );
        sqlx::query_as::<_, GroupMembership>(&query)
            .bind(username)
            .fetch_all(pool)
            .await
    }

    /// `(group_id, username)` pairs of the managers of each listed group,
    /// in grant order.
    ///
    /// A `*` membership holds every type, so its holder counts as a manager.
    /// A user holding both is reported once, at their earliest grant.
    pub async fn managers_of_groups(
        pool: &PgPool,
        group_ids: &[String],
    ) -> Result<Vec<(String, String)>, sqlx::Error> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, (String, String)>(
            "SELECT group_id, username FROM group_memberships
             WHERE group_id = ANY($1) AND membership_type IN ($2, $3)
             GROUP BY group_id, username
             ORDER BY MIN(id)",
        )
        .bind(group_ids)
        .bind(MEMBERSHIP_MANAGER)
        .bind(MEMBERSHIP_WILDCARD)
        .fetch_all(pool)
        .await
    }

    /// Distinct usernames holding any membership in a group.
    pub async fn members_of_group(
        pool: &PgPool,
        group_id: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT username FROM group_memberships
             WHERE group_id = $1
             ORDER BY username",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }
}
