//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use taskmgmt_core::identity::Identity;
use taskmgmt_core::project_tree::TreeNode;
use taskmgmt_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub calendar_integrated: bool,
    pub hidden_on: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project with its manager and participator permission strings.
#[derive(Debug, Clone)]
pub struct ProjectWithRoles {
    pub project: Project,
    pub managers: Vec<String>,
    pub participators: Vec<String>,
}

impl ProjectWithRoles {
    pub fn can_view(&self, identity: &Identity) -> bool {
        identity.can_view(&self.managers, &self.participators)
    }

    pub fn can_edit(&self, identity: &Identity) -> bool {
        identity.can_edit(&self.managers)
    }
}

impl TreeNode for ProjectWithRoles {
    fn node_id(&self) -> DbId {
        self.project.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.project.parent_id
    }
}

/// Insert payload for a project and its roles.
///
/// Built by the API layer after validation; not deserialized directly.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub parent_id: Option<DbId>,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub calendar_integrated: bool,
    pub managers: Vec<String>,
    pub participators: Vec<String>,
}
