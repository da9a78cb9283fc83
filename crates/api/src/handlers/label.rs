//! Handlers for the caller's labels and their task attachments.
//!
//! A label belongs to one user; every endpoint acting on a specific label
//! checks ownership first.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskmgmt_core::error::CoreError;
use taskmgmt_core::types::DbId;
use taskmgmt_db::models::label::{CreateLabel, Label};
use taskmgmt_db::repositories::{LabelRepo, LabelTaskMappingRepo, TaskRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/labels
pub async fn list_labels(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let labels = LabelRepo::list_by_user(&state.pool, &auth.username).await?;
    Ok(Json(DataResponse { data: labels }))
}

/// POST /api/v1/projects/labels
pub async fn create_label(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLabel>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(parent_id) = input.parent_id {
        owned_label(&state, &auth, parent_id).await?;
    }

    let label = LabelRepo::create(&state.pool, &auth.username, &input).await?;
    tracing::info!(label_id = label.id, user = %auth.username, "Label created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: label })))
}

// ---------------------------------------------------------------------------
// Label/task mappings
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/labels/{label_id}/tasks
pub async fn list_label_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(label_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_label(&state, &auth, label_id).await?;
    let mappings = LabelTaskMappingRepo::find_by_label(&state.pool, label_id).await?;
    Ok(Json(DataResponse { data: mappings }))
}

/// POST /api/v1/projects/labels/{label_id}/tasks/{task_id}
///
/// Idempotent: attaching twice returns the same mapping.
pub async fn attach_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((label_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    owned_label(&state, &auth, label_id).await?;
    TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;

    let mapping = LabelTaskMappingRepo::attach(&state.pool, label_id, task_id).await?;
    tracing::info!(label_id, task_id, user = %auth.username, "Label attached to task");

    Ok(Json(DataResponse { data: mapping }))
}

/// DELETE /api/v1/projects/labels/{label_id}/tasks/{task_id}
pub async fn detach_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((label_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    owned_label(&state, &auth, label_id).await?;

    if !LabelTaskMappingRepo::detach(&state.pool, label_id, task_id).await? {
        return Err(AppError::NotFound(format!(
            "Label {label_id} is not attached to task {task_id}"
        )));
    }

    tracing::info!(label_id, task_id, user = %auth.username, "Label detached from task");
    Ok(StatusCode::NO_CONTENT)
}

/// Load a label owned by the caller: 404 if missing, 403 if owned by
/// someone else.
async fn owned_label(state: &AppState, auth: &AuthUser, label_id: DbId) -> AppResult<Label> {
    let label = LabelRepo::find_by_id(&state.pool, label_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Label",
            id: label_id,
        }))?;

    if label.username != auth.username {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Label {label_id} belongs to another user"
        ))));
    }
    Ok(label)
}
