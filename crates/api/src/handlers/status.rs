//! Handlers for a project's workflow statuses.

use axum::extract::{Path, State};
use axum::Json;
use taskmgmt_core::error::CoreError;
use taskmgmt_core::identity::Identity;
use taskmgmt_core::types::DbId;
use taskmgmt_db::models::project::ProjectWithRoles;
use taskmgmt_db::models::status::Status;
use taskmgmt_db::repositories::{ProjectRepo, StatusRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentIdentity;
use crate::state::AppState;

/// GET /api/v1/projects/projects/status/{id}
///
/// The project's default (lowest-ranked) status, or `null`.
pub async fn get_default_status(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Option<Status>>> {
    viewable_project(&state, &identity, project_id).await?;
    let status = StatusRepo::find_default(&state.pool, project_id).await?;
    Ok(Json(status))
}

/// GET /api/v1/projects/projects/statuses/{id}
pub async fn list_statuses(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Status>>> {
    viewable_project(&state, &identity, project_id).await?;
    let statuses = StatusRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(statuses))
}

/// Load a project the caller may view: 404 if it does not exist, 401 if
/// the caller is neither a manager nor a participator.
async fn viewable_project(
    state: &AppState,
    identity: &Identity,
    project_id: DbId,
) -> AppResult<ProjectWithRoles> {
    let project = ProjectRepo::find_with_roles(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    if !project.can_view(identity) {
        return Err(AppError::Core(CoreError::Unauthorized(format!(
            "No permission to view project {project_id}"
        ))));
    }
    Ok(project)
}
