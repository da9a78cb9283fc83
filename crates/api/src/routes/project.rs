//! Project, status and user-lookup routes mounted at `/projects`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project, status, user};
use crate::state::AppState;

/// ```text
/// GET    /projects                        -> list_projects
/// GET    /projects/status/{id}            -> get_default_status
/// GET    /projects/statuses/{id}          -> list_statuses
/// GET    /users/{query}/{project_name}    -> find_users
/// POST   /createproject                   -> create_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(project::list_projects))
        .route("/projects/status/{id}", get(status::get_default_status))
        .route("/projects/statuses/{id}", get(status::list_statuses))
        .route("/users/{query}/{project_name}", get(user::find_users))
        .route("/createproject", post(project::create_project))
}
