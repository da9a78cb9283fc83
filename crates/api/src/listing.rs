//! Project listing assembly.
//!
//! Walks the project forest in pre-order, keeps the nodes the caller may
//! view, and decorates each with its task counts per status, resolved
//! manager users, attributed space, direct children and default status.
//! Any failure aborts the whole listing.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use sqlx::PgPool;
use taskmgmt_core::identity::{Identity, Permission};
use taskmgmt_core::managers::{resolve_managers, SpaceAttribution};
use taskmgmt_core::project_tree::Forest;
use taskmgmt_core::types::{DbId, Timestamp};
use taskmgmt_db::models::project::ProjectWithRoles;
use taskmgmt_db::models::space::Space;
use taskmgmt_db::models::status::Status;
use taskmgmt_db::models::user::User;
use taskmgmt_db::repositories::{ProjectRepo, SpaceRepo, StatusRepo, TaskRepo, UserRepo};

use crate::error::AppResult;

/// Number of tasks in one status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStat {
    pub status: String,
    pub task_number: i64,
}

/// A resolved manager as shown in the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerIdentity {
    pub username: String,
    pub email: Option<String>,
    pub display_name: String,
    pub avatar: Option<String>,
    pub url: Option<String>,
    pub enable: bool,
    pub deleted: bool,
}

impl ManagerIdentity {
    /// Placeholder for a manager name with no user row.
    pub fn missing(username: &str) -> Self {
        Self {
            username: username.to_string(),
            email: None,
            display_name: username.to_string(),
            avatar: None,
            url: None,
            enable: false,
            deleted: true,
        }
    }
}

impl From<&User> for ManagerIdentity {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
            url: user.url.clone(),
            enable: user.is_enabled,
            deleted: user.is_deleted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSummary {
    pub id: DbId,
    pub pretty_name: String,
    pub display_name: String,
    pub url: Option<String>,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
}

impl From<&Space> for SpaceSummary {
    fn from(space: &Space) -> Self {
        Self {
            id: space.id,
            pretty_name: space.pretty_name.clone(),
            display_name: space.display_name.clone(),
            url: space.url.clone(),
            avatar_url: space.avatar_url.clone(),
            description: space.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChildSummary {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
}

impl From<&ProjectWithRoles> for ChildSummary {
    fn from(child: &ProjectWithRoles) -> Self {
        Self {
            id: child.project.id,
            name: child.project.name.clone(),
            color: child.project.color.clone(),
        }
    }
}

/// One entry of `GET /projects/projects`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListing {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub calendar_integrated: bool,
    pub hidden_on: Option<Timestamp>,
    pub manager: Vec<String>,
    pub participator: Vec<String>,
    pub children: Vec<ChildSummary>,
    pub status: Option<Status>,
    pub status_stats: Vec<StatusStat>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub manager_identities: Vec<ManagerIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceSummary>,
}

/// Build the listing of every project `identity` may view.
pub async fn list_visible(
    pool: &PgPool,
    identity: &Identity,
    attribution: SpaceAttribution,
) -> AppResult<Vec<ProjectListing>> {
    let projects = ProjectRepo::list_with_roles(pool).await?;
    let forest = Forest::build(&projects);
    let visible = forest.visible_preorder(|p| p.can_view(identity))?;
    if visible.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<DbId> = visible.iter().map(|p| p.project.id).collect();
    let spaces = SpaceRepo::find_with_managers(pool, &manager_group_ids(&visible)).await?;

    let resolved = visible
        .iter()
        .map(|p| resolve_managers(&p.managers, |g| spaces.get(g), attribution))
        .collect::<Result<Vec<_>, _>>()?;

    let usernames: Vec<String> = resolved
        .iter()
        .flat_map(|r| r.users.iter().cloned())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let users: HashMap<String, User> = UserRepo::find_by_usernames(pool, &usernames)
        .await?
        .into_iter()
        .map(|u| (u.username.clone(), u))
        .collect();

    let mut defaults: HashMap<DbId, Status> = StatusRepo::find_defaults(pool, &ids)
        .await?
        .into_iter()
        .map(|s| (s.project_id, s))
        .collect();

    let mut stats: HashMap<DbId, Vec<StatusStat>> = HashMap::new();
    for row in TaskRepo::count_by_status(pool, &ids).await? {
        stats.entry(row.project_id).or_default().push(StatusStat {
            status: row.status,
            task_number: row.task_number,
        });
    }

    let listing = visible
        .into_iter()
        .zip(resolved)
        .map(|(p, managers)| {
            let id = p.project.id;
            ProjectListing {
                id,
                name: p.project.name.clone(),
                color: p.project.color.clone(),
                description: p.project.description.clone(),
                due_date: p.project.due_date,
                calendar_integrated: p.project.calendar_integrated,
                hidden_on: p.project.hidden_on,
                manager: p.managers.clone(),
                participator: p.participators.clone(),
                children: forest.children_of(id).map(ChildSummary::from).collect(),
                status: defaults.remove(&id),
                status_stats: stats.remove(&id).unwrap_or_default(),
                manager_identities: managers
                    .users
                    .iter()
                    .map(|name| {
                        users
                            .get(name)
                            .map(ManagerIdentity::from)
                            .unwrap_or_else(|| ManagerIdentity::missing(name))
                    })
                    .collect(),
                space: managers.space.map(|s| SpaceSummary::from(&s.space)),
            }
        })
        .collect();

    Ok(listing)
}

/// Distinct group ids referenced by the manager entries of `projects`.
fn manager_group_ids(projects: &[&ProjectWithRoles]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|p| p.managers.iter())
        .filter_map(|raw| Permission::parse(raw).group_id())
        .collect::<HashSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use taskmgmt_db::models::project::Project;

    use super::*;

    fn project(id: DbId, managers: &[&str]) -> ProjectWithRoles {
        ProjectWithRoles {
            project: Project {
                id,
                parent_id: None,
                name: format!("P{id}"),
                color: None,
                description: None,
                due_date: None,
                calendar_integrated: false,
                hidden_on: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            managers: managers.iter().map(|m| m.to_string()).collect(),
            participators: Vec::new(),
        }
    }

    #[test]
    fn missing_manager_is_rendered_as_deleted() {
        let ghost = ManagerIdentity::missing("ghost");
        assert_eq!(ghost.display_name, "ghost");
        assert!(!ghost.enable);
        assert!(ghost.deleted);
        assert!(ghost.email.is_none());
    }

    #[test]
    fn group_ids_are_collected_once() {
        let a = project(1, &["alice", "manager:/spaces/ops"]);
        let b = project(2, &["*:/spaces/ops", "member:/spaces/dev"]);
        let mut ids = manager_group_ids(&[&a, &b]);
        ids.sort();
        assert_eq!(ids, ["/spaces/dev", "/spaces/ops"]);
    }

    #[test]
    fn empty_optional_sections_are_omitted() {
        let p = project(7, &["alice"]);
        let entry = ProjectListing {
            id: 7,
            name: p.project.name.clone(),
            color: None,
            description: None,
            due_date: None,
            calendar_integrated: false,
            hidden_on: None,
            manager: p.managers.clone(),
            participator: Vec::new(),
            children: Vec::new(),
            status: None,
            status_stats: Vec::new(),
            manager_identities: Vec::new(),
            space: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("managerIdentities").is_none());
        assert!(json.get("space").is_none());
        assert_eq!(json["statusStats"], serde_json::json!([]));
        assert_eq!(json["calendarIntegrated"], false);
        assert!(json["status"].is_null());
    }
}
