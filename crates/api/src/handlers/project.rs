//! Handlers for the project listing and project creation.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use taskmgmt_core::error::CoreError;
use taskmgmt_core::html::{encode_entities, encode_injected_html_tags};
use taskmgmt_core::managers::first_group_id;
use taskmgmt_core::space_roles::ProjectRoles;
use taskmgmt_core::types::DbId;
use taskmgmt_db::models::project::CreateProject;
use taskmgmt_db::repositories::{ProjectRepo, SpaceRepo, StatusRepo};

use crate::error::{AppError, AppResult};
use crate::listing::{self, ProjectListing};
use crate::middleware::auth::CurrentIdentity;
use crate::state::AppState;

/// Reference to an existing project by id.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    pub id: DbId,
}

/// Body of `POST /projects/createproject`.
///
/// Only the name, description, manager entries and parent are read. Roles
/// are assigned server-side and calendar integration starts disabled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub manager: Vec<String>,
    pub parent: Option<ProjectRef>,
}

#[derive(Debug, Serialize)]
pub struct CreatedProject {
    pub id: DbId,
    pub name: String,
    pub color: &'static str,
}

/// GET /api/v1/projects/projects
///
/// Every project the caller may view, flattened in tree pre-order.
pub async fn list_projects(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectListing>>> {
    let projects =
        listing::list_visible(&state.pool, &identity, state.config.space_attribution).await?;
    tracing::debug!(user = %identity.user_id, count = projects.len(), "Listed projects");
    Ok(Json(projects))
}

/// POST /api/v1/projects/createproject
///
/// Creates a root project (seeded with the initial statuses) or a child of
/// an editable parent (inheriting its statuses). Project, roles and statuses
/// are written in one transaction.
pub async fn create_project(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<Json<CreatedProject>> {
    let name = match input.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(AppError::NotFound("Project name is required".into())),
    };
    let description = input.description.as_deref().map(encode_injected_html_tags);

    let space = match first_group_id(input.manager.iter().map(String::as_str)) {
        Some(group_id) => SpaceRepo::find_by_group_id(&state.pool, group_id).await?,
        None => None,
    };
    let roles = match &space {
        Some(space) => ProjectRoles::for_space(&identity.user_id, &space.group_id),
        None => ProjectRoles::personal(&identity.user_id),
    };

    let parent_id = match input.parent {
        Some(ProjectRef { id }) => {
            let parent = ProjectRepo::find_with_roles(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Project",
                    id,
                }))?;
            if !parent.can_edit(&identity) {
                return Err(AppError::Core(CoreError::Forbidden(format!(
                    "No permission to add a sub-project to project {id}"
                ))));
            }
            Some(id)
        }
        None => None,
    };

    let create = CreateProject {
        parent_id,
        name,
        color: None,
        description,
        due_date: None,
        calendar_integrated: false,
        managers: roles.managers,
        participators: roles.participators,
    };

    let mut tx = state.pool.begin().await?;
    let project = ProjectRepo::create(&mut *tx, &create).await?;
    let inherited = match parent_id {
        Some(parent_id) => StatusRepo::names_by_project(&mut *tx, parent_id).await?,
        None => Vec::new(),
    };
    if inherited.is_empty() {
        StatusRepo::create_initial(&mut *tx, project.id).await?;
    } else {
        StatusRepo::create_ordered(&mut *tx, project.id, &inherited).await?;
    }
    tx.commit().await?;

    tracing::info!(
        project_id = project.id,
        parent_id = ?parent_id,
        space = ?space.as_ref().map(|s| &s.group_id),
        user = %identity.user_id,
        "Project created",
    );

    Ok(Json(CreatedProject {
        id: project.id,
        name: encode_entities(&project.name),
        color: "transparent",
    }))
}
