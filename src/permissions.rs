//! Roles and Permission Sets
//!
//! Static role-to-permission mapping. Permission sets are derived from the
//! role string on every check rather than persisted, so a stale store can
//! never grant rights the role no longer carries.

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Supervisor,
    User,
}

const ADMIN_PERMISSIONS: &[&str] = &[
    "dashboard.view",
    "families.view",
    "families.create",
    "families.edit",
    "families.delete",
    "plants.view",
    "plants.create",
    "plants.edit",
    "plants.delete",
    "anganwadi.view",
    "anganwadi.create",
    "anganwadi.edit",
    "anganwadi.delete",
    "analytics.view",
    "reports.view",
    "reports.export",
    "settings.view",
    "settings.edit",
];

const SUPERVISOR_PERMISSIONS: &[&str] = &[
    "dashboard.view",
    "families.view",
    "families.create",
    "families.edit",
    "plants.view",
    "plants.create",
    "plants.edit",
    "anganwadi.view",
    "anganwadi.edit",
    "analytics.view",
    "reports.view",
];

const USER_PERMISSIONS: &[&str] = &[
    "dashboard.view",
    "families.view",
    "plants.view",
    "anganwadi.view",
];

impl Role {
    /// Parse a role string. Unknown roles degrade to the least-privileged
    /// `User` role.
    pub fn parse(role: &str) -> Self {
        match role {
            "admin" => Role::Admin,
            "supervisor" => Role::Supervisor,
            _ => Role::User,
        }
    }

    /// Role string as persisted in the session record
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::User => "user",
        }
    }

    /// Ordered permission set for this role
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Role::Admin => ADMIN_PERMISSIONS,
            Role::Supervisor => SUPERVISOR_PERMISSIONS,
            Role::User => USER_PERMISSIONS,
        }
    }

    /// Whether this role carries the given permission
    pub fn allows(&self, permission: &str) -> bool {
        self.permissions().contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("supervisor"), Role::Supervisor);
        assert_eq!(Role::parse("user"), Role::User);
    }

    #[test]
    fn test_parse_unknown_role_degrades_to_user() {
        assert_eq!(Role::parse("superadmin"), Role::User);
        assert_eq!(Role::parse(""), Role::User);
    }

    #[test]
    fn test_admin_allows_delete() {
        assert!(Role::Admin.allows("families.delete"));
        assert!(Role::Admin.allows("settings.edit"));
    }

    #[test]
    fn test_supervisor_cannot_delete() {
        assert!(Role::Supervisor.allows("families.edit"));
        assert!(!Role::Supervisor.allows("families.delete"));
        assert!(!Role::Supervisor.allows("settings.view"));
    }

    #[test]
    fn test_user_is_view_only() {
        assert!(Role::User.allows("dashboard.view"));
        assert!(!Role::User.allows("families.create"));
        assert!(!Role::User.allows(""));
    }

    #[test]
    fn test_user_permissions_are_subset_of_supervisor() {
        for permission in Role::User.permissions() {
            assert!(
                Role::Supervisor.allows(permission),
                "supervisor missing {}",
                permission
            );
        }
    }
}
