//! Repository for the `spaces` table.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::models::space::{CreateSpace, Space, SpaceWithManagers};
use crate::repositories::MembershipRepo;

const COLUMNS: &str = "id, group_id, pretty_name, display_name, url, avatar_url, \
                       description, created_at, updated_at";

/// Provides space registration and lookups by group or pretty name.
pub struct SpaceRepo;

impl SpaceRepo {
    /// Register a space, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSpace) -> Result<Space, sqlx::Error> {
        let query = format!(
            "INSERT INTO spaces (group_id, pretty_name, display_name, url, avatar_url, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Space>(&query)
            .bind(&input.group_id)
            .bind(&input.pretty_name)
            .bind(&input.display_name)
            .bind(&input.url)
            .bind(&input.avatar_url)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find the space owning a group.
    pub async fn find_by_group_id(
        pool: &PgPool,
        group_id: &str,
    ) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE group_id = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(group_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a space by its URL-friendly name.
    pub async fn find_by_pretty_name(
        pool: &PgPool,
        pretty_name: &str,
    ) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE pretty_name = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(pretty_name)
            .fetch_optional(pool)
            .await
    }

    /// Load the spaces owning the given groups, each with its managers,
    /// keyed by group id. Groups without a space are absent.
    pub async fn find_with_managers(
        pool: &PgPool,
        group_ids: &[String],
    ) -> Result<HashMap<String, SpaceWithManagers>, sqlx::Error> {
        if group_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE group_id = ANY($1)");
        let spaces = sqlx::query_as::<_, Space>(&query)
            .bind(group_ids)
            .fetch_all(pool)
            .await?;

        let mut by_group: HashMap<String, SpaceWithManagers> = spaces
            .into_iter()
            .map(|space| {
                (
                    space.group_id.clone(),
                    SpaceWithManagers {
                        space,
                        managers: Vec::new(),
                    },
                )
            })
            .collect();

        for (group_id, username) in MembershipRepo::managers_of_groups(pool, group_ids).await? {
            if let Some(entry) = by_group.get_mut(&group_id) {
                entry.managers.push(username);
            }
        }

        Ok(by_group)
    }
}
