use toolgate_core::{Tool, User};

/// Outcome of matching a user's groups against a tool's access groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The tool declares no access groups.
    Unrestricted,
    /// The user holds at least one required group; carries the first match.
    Granted(String),
    Denied,
}

impl AccessDecision {
    pub fn evaluate(required: &[String], user: &User) -> Self {
        if required.is_empty() {
            return AccessDecision::Unrestricted;
        }

        required
            .iter()
            .find(|group| user.is_member_of(group))
            .map(|group| AccessDecision::Granted(group.clone()))
            .unwrap_or(AccessDecision::Denied)
    }

    pub fn is_granted(&self) -> bool {
        !matches!(self, AccessDecision::Denied)
    }
}

/// Grants when the tool is unrestricted or the group sets intersect. Pure: no logging.
pub fn check_access(tool: &dyn Tool, user: &User) -> bool {
    AccessDecision::evaluate(&tool.access_groups(), user).is_granted()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_groups_unrestricted() {
        let user = User::new("nobody");
        assert_eq!(
            AccessDecision::evaluate(&[], &user),
            AccessDecision::Unrestricted
        );
        assert!(AccessDecision::evaluate(&[], &user).is_granted());
    }

    #[test]
    fn test_intersection_rules() {
        let required = groups(&["admin", "analyst"]);

        let cases: [(&[&str], bool); 4] = [
            (&["admin", "viewer"], true),
            (&["analyst"], true),
            (&["viewer"], false),
            (&[], false),
        ];

        for (memberships, expected) in cases {
            let user = User::new("u").with_groups(memberships.iter().copied());
            assert_eq!(
                AccessDecision::evaluate(&required, &user).is_granted(),
                expected,
                "memberships {memberships:?}"
            );
        }
    }

    #[test]
    fn test_granted_reports_matching_group() {
        let user = User::new("u").with_groups(["viewer", "analyst"]);
        assert_eq!(
            AccessDecision::evaluate(&groups(&["admin", "analyst"]), &user),
            AccessDecision::Granted("analyst".into())
        );
    }
}
