//! Expansion of project manager permission strings into user ids.
//!
//! A literal entry is kept as-is. A group entry (`type:group`) is replaced by
//! the managers of the space owning `group`. The result keeps first-seen
//! order and drops duplicates.

use std::str::FromStr;

use indexmap::IndexSet;
use crate::error::CoreError;
use crate::identity::Permission;

/// Which space a project is attributed to when several manager entries
/// resolve to spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpaceAttribution {
    /// The last group entry scanned wins.
    #[default]
    LastResolved,
    /// The first group entry scanned wins.
    FirstResolved,
}

impl FromStr for SpaceAttribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" | "last_resolved" => Ok(Self::LastResolved),
            "first" | "first_resolved" => Ok(Self::FirstResolved),
            other => Err(format!("unknown space attribution '{other}'")),
        }
    }
}

/// A space able to report its manager user ids.
pub trait SpaceManagers {
    fn manager_ids(&self) -> &[String];
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no space is registered for group '{group_id}'")]
    UnknownSpace { group_id: String },
}

impl From<ResolveError> for CoreError {
    fn from(err: ResolveError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

/// Output of [`resolve_managers`].
#[derive(Debug)]
pub struct ResolvedManagers<'s, S> {
    /// De-duplicated manager user ids in first-seen order.
    pub users: IndexSet<String>,
    /// Space the project is attributed to, if any group entry resolved.
    pub space: Option<&'s S>,
}

/// Resolve manager permission strings against a space lookup.
///
/// `lookup` maps a group id to its space. A group entry whose group has no
/// space is an error; a space without managers contributes nothing.
pub fn resolve_managers<'s, S, F, I, T>(
    permissions: I,
    lookup: F,
    attribution: SpaceAttribution,
) -> Result<ResolvedManagers<'s, S>, ResolveError>
where
    S: SpaceManagers,
    F: Fn(&str) -> Option<&'s S>,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut users = IndexSet::new();
    let mut space: Option<&'s S> = None;

    for raw in permissions {
        let raw = raw.as_ref();
        match Permission::parse(raw) {
            Permission::User(user) => {
                users.insert(user.to_string());
            }
            Permission::Group { group_id, .. } => {
                let resolved = lookup(group_id).ok_or_else(|| ResolveError::UnknownSpace {
                    group_id: group_id.to_string(),
                })?;
                users.extend(resolved.manager_ids().iter().cloned());
                if space.is_none() || attribution == SpaceAttribution::LastResolved {
                    space = Some(resolved);
                }
            }
        }
    }

    Ok(ResolvedManagers { users, space })
}

/// Group id of the first group entry, if any.
pub fn first_group_id<'a, I>(permissions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    permissions
        .into_iter()
        .find_map(|raw| Permission::parse(raw).group_id())
}
