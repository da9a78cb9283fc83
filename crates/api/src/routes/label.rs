//! Label routes mounted at `/projects/labels`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::label;
use crate::state::AppState;

/// ```text
/// GET    /                              -> list_labels
/// POST   /                              -> create_label
/// GET    /{label_id}/tasks              -> list_label_tasks
/// POST   /{label_id}/tasks/{task_id}    -> attach_task
/// DELETE /{label_id}/tasks/{task_id}    -> detach_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(label::list_labels).post(label::create_label))
        .route("/{label_id}/tasks", get(label::list_label_tasks))
        .route(
            "/{label_id}/tasks/{task_id}",
            post(label::attach_task).delete(label::detach_task),
        )
}
