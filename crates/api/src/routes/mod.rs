pub mod health;
pub mod label;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects/projects                               project listing (GET)
/// /projects/projects/status/{id}                   default status (GET)
/// /projects/projects/statuses/{id}                 all statuses (GET)
/// /projects/users/{query}/{project_name}           user lookup (GET)
/// /projects/createproject                          create project (POST)
///
/// /projects/labels                                 list, create (GET, POST)
/// /projects/labels/{label_id}/tasks                label mappings (GET)
/// /projects/labels/{label_id}/tasks/{task_id}      attach, detach (POST, DELETE)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest(
        "/projects",
        project::router().nest("/labels", label::router()),
    )
}
