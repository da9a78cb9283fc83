//! Repository for the `statuses` table.

use sqlx::{PgConnection, PgPool};
use taskmgmt_core::statuses::{ranked, INITIAL_STATUSES};
use taskmgmt_core::types::DbId;

use crate::models::status::Status;

const COLUMNS: &str = "id, project_id, name, rank, created_at, updated_at";

/// Provides status seeding and lookups.
pub struct StatusRepo;

impl StatusRepo {
    /// Insert statuses for a project in the given order, ranked from zero.
    pub async fn create_ordered(
        conn: &mut PgConnection,
        project_id: DbId,
        names: &[String],
    ) -> Result<Vec<Status>, sqlx::Error> {
        let (names, ranks): (Vec<String>, Vec<i32>) =
            ranked(names.iter().cloned()).into_iter().unzip();
        let query = format!(
            "INSERT INTO statuses (project_id, name, rank)
             SELECT $1, t.name, t.rank FROM UNNEST($2::text[], $3::int4[]) AS t(name, rank)
             RETURNING {COLUMNS}"
        );
        let mut created = sqlx::query_as::<_, Status>(&query)
            .bind(project_id)
            .bind(&names)
            .bind(&ranks)
            .fetch_all(conn)
            .await?;
        created.sort_by_key(|s| s.rank);
        Ok(created)
    }

    /// Seed a root project with the initial workflow.
    pub async fn create_initial(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Vec<Status>, sqlx::Error> {
        let names: Vec<String> = INITIAL_STATUSES.iter().map(|s| s.to_string()).collect();
        Self::create_ordered(conn, project_id, &names).await
    }

    /// Status names of a project in rank order.
    pub async fn names_by_project(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM statuses WHERE project_id = $1 ORDER BY rank, id",
        )
        .bind(project_id)
        .fetch_all(conn)
        .await
    }

    /// All statuses of a project in rank order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Status>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM statuses WHERE project_id = $1 ORDER BY rank, id");
        sqlx::query_as::<_, Status>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// The lowest-ranked status of a project.
    pub async fn find_default(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Status>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM statuses WHERE project_id = $1 ORDER BY rank, id LIMIT 1"
        );
        sqlx::query_as::<_, Status>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Default status of each listed project that has one.
    pub async fn find_defaults(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<Status>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (project_id) {COLUMNS} FROM statuses
             WHERE project_id = ANY($1)
             ORDER BY project_id, rank, id"
        );
        sqlx::query_as::<_, Status>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }
}
