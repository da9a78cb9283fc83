//! Manager and participator permissions assigned to a newly created project.

use crate::identity::{group_permission, MEMBERSHIP_MANAGER, MEMBERSHIP_WILDCARD};

/// Initial role assignment of a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoles {
    pub managers: Vec<String>,
    pub participators: Vec<String>,
}

impl ProjectRoles {
    /// A project outside any space: the creator manages it alone.
    pub fn personal(creator: &str) -> Self {
        Self {
            managers: vec![creator.to_string()],
            participators: Vec::new(),
        }
    }

    /// A project inside a space: the creator and the space managers manage
    /// it, every space member participates.
    pub fn for_space(creator: &str, group_id: &str) -> Self {
        Self {
            managers: vec![
                creator.to_string(),
                group_permission(MEMBERSHIP_MANAGER, group_id),
            ],
            participators: vec![group_permission(MEMBERSHIP_WILDCARD, group_id)],
        }
    }
}
