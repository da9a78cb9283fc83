//! Handler for user lookup when mentioning or assigning within a project.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use taskmgmt_db::repositories::{MembershipRepo, SpaceRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum number of users considered per lookup.
pub const USER_SEARCH_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
pub struct UserSuggestion {
    pub username: String,
    pub fullname: String,
    pub avatar: Option<String>,
}

/// GET /api/v1/projects/users/{query}/{project_name}
///
/// Users whose username or display name contains `query`. When
/// `project_name` is the pretty name of a space, only its members are kept.
/// The search limit applies before the membership filter.
pub async fn find_users(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((query, project_name)): Path<(String, String)>,
) -> AppResult<Json<Vec<UserSuggestion>>> {
    let users = UserRepo::search_by_name(&state.pool, &query, USER_SEARCH_LIMIT).await?;

    let members: Option<HashSet<String>> =
        match SpaceRepo::find_by_pretty_name(&state.pool, &project_name).await? {
            Some(space) => Some(
                MembershipRepo::members_of_group(&state.pool, &space.group_id)
                    .await?
                    .into_iter()
                    .collect(),
            ),
            None => None,
        };

    let suggestions = users
        .into_iter()
        .filter(|u| members.as_ref().is_none_or(|m| m.contains(&u.username)))
        .map(|u| UserSuggestion {
            username: u.username,
            fullname: u.display_name,
            avatar: u.avatar,
        })
        .collect();

    Ok(Json(suggestions))
}
