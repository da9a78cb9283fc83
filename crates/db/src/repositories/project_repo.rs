//! Repository for the `projects` table and its role tables.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use taskmgmt_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectWithRoles};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, parent_id, name, color, description, due_date, \
                       calendar_integrated, hidden_on, created_at, updated_at";

const MANAGERS_TABLE: &str = "project_managers";
const PARTICIPATORS_TABLE: &str = "project_participators";

/// Provides create and read operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project and its role permissions, returning the created row.
    ///
    /// Runs on the caller's connection so it can share a transaction with
    /// status seeding.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (parent_id, name, color, description, due_date, calendar_integrated)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(input.parent_id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.calendar_integrated)
            .fetch_one(&mut *conn)
            .await?;

        Self::insert_roles(&mut *conn, MANAGERS_TABLE, project.id, &input.managers).await?;
        Self::insert_roles(&mut *conn, PARTICIPATORS_TABLE, project.id, &input.participators)
            .await?;

        Ok(project)
    }

    async fn insert_roles(
        conn: &mut PgConnection,
        table: &str,
        project_id: DbId,
        permissions: &[String],
    ) -> Result<(), sqlx::Error> {
        if permissions.is_empty() {
            return Ok(());
        }
        let query = format!(
            "INSERT INTO {table} (project_id, permission)
             SELECT $1, UNNEST($2::text[])
             ON CONFLICT (project_id, permission) DO NOTHING"
        );
        sqlx::query(&query)
            .bind(project_id)
            .bind(permissions)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID together with its manager and participator
    /// permissions.
    pub async fn find_with_roles(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithRoles>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let mut managers = Self::roles_for(pool, MANAGERS_TABLE, &[id]).await?;
        let mut participators = Self::roles_for(pool, PARTICIPATORS_TABLE, &[id]).await?;
        Ok(Some(ProjectWithRoles {
            project,
            managers: managers.remove(&id).unwrap_or_default(),
            participators: participators.remove(&id).unwrap_or_default(),
        }))
    }

    /// List every project with its roles, ordered by name then ID.
    ///
    /// The flat list is what the project forest is built from; sibling
    /// order in the forest follows this order.
    pub async fn list_with_roles(pool: &PgPool) -> Result<Vec<ProjectWithRoles>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY name, id");
        let projects = sqlx::query_as::<_, Project>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let mut managers = Self::roles_for(pool, MANAGERS_TABLE, &ids).await?;
        let mut participators = Self::roles_for(pool, PARTICIPATORS_TABLE, &ids).await?;

        Ok(projects
            .into_iter()
            .map(|project| ProjectWithRoles {
                managers: managers.remove(&project.id).unwrap_or_default(),
                participators: participators.remove(&project.id).unwrap_or_default(),
                project,
            })
            .collect())
    }

    /// Permission strings per project, in insertion order.
    async fn roles_for(
        pool: &PgPool,
        table: &str,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<String>>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT project_id, permission FROM {table}
             WHERE project_id = ANY($1)
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, (DbId, String)>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        let mut by_project: HashMap<DbId, Vec<String>> = HashMap::new();
        for (project_id, permission) in rows {
            by_project.entry(project_id).or_default().push(permission);
        }
        Ok(by_project)
    }
}
