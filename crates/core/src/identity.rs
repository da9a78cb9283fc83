//! Caller identity and permission-string matching.
//!
//! Project managers and participators are stored as permission strings.
//! A string without a `:` names a user directly; `type:group` names every
//! member of `group` holding membership `type` (`*` matches any type).

/// Separator between the membership type and the group id.
pub const GROUP_DELIMITER: char = ':';

/// Membership type matching any other membership type.
pub const MEMBERSHIP_WILDCARD: &str = "*";

/// Membership type of group (space) managers.
pub const MEMBERSHIP_MANAGER: &str = "manager";

/// A single group membership held by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub membership_type: String,
    pub group_id: String,
}

impl Membership {
    pub fn new(membership_type: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            membership_type: membership_type.into(),
            group_id: group_id.into(),
        }
    }

    fn grants(&self, membership_type: &str, group_id: &str) -> bool {
        self.group_id == group_id
            && (membership_type == MEMBERSHIP_WILDCARD
                || self.membership_type == MEMBERSHIP_WILDCARD
                || self.membership_type == membership_type)
    }
}

/// A parsed permission string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission<'a> {
    /// A literal user id.
    User(&'a str),
    /// Every holder of `membership_type` in `group_id`.
    Group {
        membership_type: &'a str,
        group_id: &'a str,
    },
}

impl<'a> Permission<'a> {
    /// Split on the first `:`. Anything without a delimiter is a user id.
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once(GROUP_DELIMITER) {
            Some((membership_type, group_id)) => Permission::Group {
                membership_type,
                group_id,
            },
            None => Permission::User(raw),
        }
    }

    /// The referenced group id, if this is a group permission.
    pub fn group_id(&self) -> Option<&'a str> {
        match *self {
            Permission::Group { group_id, .. } => Some(group_id),
            Permission::User(_) => None,
        }
    }
}

/// Build a `type:group` permission string.
pub fn group_permission(membership_type: &str, group_id: &str) -> String {
    format!("{membership_type}{GROUP_DELIMITER}{group_id}")
}

/// The authenticated caller of a request.
///
/// Built once per request from the validated token subject and the user's
/// stored group memberships, then passed explicitly to every check.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub memberships: Vec<Membership>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, memberships: Vec<Membership>) -> Self {
        Self {
            user_id: user_id.into(),
            memberships,
        }
    }

    /// Whether this identity is covered by a single permission string.
    pub fn has_permission(&self, raw: &str) -> bool {
        match Permission::parse(raw) {
            Permission::User(user) => user == self.user_id,
            Permission::Group {
                membership_type,
                group_id,
            } => self
                .memberships
                .iter()
                .any(|m| m.grants(membership_type, group_id)),
        }
    }

    fn has_any<I, S>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions
            .into_iter()
            .any(|p| self.has_permission(p.as_ref()))
    }

    /// Managers and participators may view a project.
    pub fn can_view<M, P, S, T>(&self, managers: M, participators: P) -> bool
    where
        M: IntoIterator<Item = S>,
        P: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        self.has_any(managers) || self.has_any(participators)
    }

    /// Only managers may edit a project (and create children under it).
    pub fn can_edit<M, S>(&self, managers: M) -> bool
    where
        M: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.has_any(managers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity::new(
            "alice",
            vec![
                Membership::new("member", "/spaces/design"),
                Membership::new("manager", "/spaces/ops"),
            ],
        )
    }

    #[test]
    fn parses_user_and_group_permissions() {
        assert_eq!(Permission::parse("bob"), Permission::User("bob"));
        assert_eq!(
            Permission::parse("manager:/spaces/ops"),
            Permission::Group {
                membership_type: "manager",
                group_id: "/spaces/ops"
            }
        );
    }

    #[test]
    fn splits_on_first_delimiter_only() {
        assert_eq!(
            Permission::parse("*:/platform:legacy").group_id(),
            Some("/platform:legacy")
        );
    }

    #[test]
    fn literal_user_permission() {
        let id = alice();
        assert!(id.has_permission("alice"));
        assert!(!id.has_permission("bob"));
    }

    #[test]
    fn wildcard_permission_matches_any_membership() {
        let id = alice();
        assert!(id.has_permission("*:/spaces/design"));
        assert!(id.has_permission("*:/spaces/ops"));
        assert!(!id.has_permission("*:/spaces/finance"));
    }

    #[test]
    fn typed_permission_requires_same_type() {
        let id = alice();
        assert!(id.has_permission("manager:/spaces/ops"));
        assert!(!id.has_permission("manager:/spaces/design"));
    }

    #[test]
    fn wildcard_membership_grants_every_type() {
        let id = Identity::new("root", vec![Membership::new("*", "/platform/admins")]);
        assert!(id.has_permission("manager:/platform/admins"));
    }

    #[test]
    fn participators_can_view_but_not_edit() {
        let id = alice();
        let managers = ["bob"];
        let participators = ["*:/spaces/design"];
        assert!(id.can_view(managers, participators));
        assert!(!id.can_edit(managers));
    }

    #[test]
    fn managers_can_view_and_edit() {
        let id = alice();
        let managers = vec!["manager:/spaces/ops".to_string()];
        assert!(id.can_view(&managers, Vec::<String>::new()));
        assert!(id.can_edit(&managers));
    }

    #[test]
    fn group_permission_round_trips_through_parse() {
        let raw = group_permission(MEMBERSHIP_MANAGER, "/spaces/ops");
        assert_eq!(raw, "manager:/spaces/ops");
        assert_eq!(Permission::parse(&raw).group_id(), Some("/spaces/ops"));
    }
}
