//! Authorization predicates over a user identity.
//!
//! Pure policy checks for UI gating. The backend is authoritative; these
//! only decide what to render.

use memadmin_core::User;

/// Whether the user holds `role`, accepting both bare (`ADMIN`) and
/// prefixed (`ROLE_ADMIN`) spellings as the backend emits either.
pub fn has_role(user: &User, role: &str) -> bool {
    user.roles
        .iter()
        .any(|r| r == role || r.strip_prefix("ROLE_") == Some(role))
}

/// Whether the user holds the exact permission string.
pub fn has_permission(user: &User, permission: &str) -> bool {
    user.permissions.iter().any(|p| p == permission)
}

pub fn is_admin(user: &User) -> bool {
    has_role(user, "ADMIN")
}

pub fn is_moderator(user: &User) -> bool {
    has_role(user, "MODERATOR") || is_admin(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use memadmin_core::UserId;

    fn user(roles: &[&str], permissions: &[&str]) -> User {
        User {
            id: UserId::new(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: None,
            last_name: None,
            roles: roles.iter().map(|s| s.to_string()).collect(),
            permissions: permissions.iter().map(|s| s.to_string()).collect(),
            enabled: true,
            account_locked: false,
            last_login_date: None,
        }
    }

    #[test]
    fn role_matches_with_and_without_prefix() {
        let prefixed = user(&["ROLE_ADMIN"], &[]);
        let bare = user(&["ADMIN"], &[]);

        assert!(has_role(&prefixed, "ADMIN"));
        assert!(has_role(&bare, "ADMIN"));
        assert!(!has_role(&bare, "MODERATOR"));
    }

    #[test]
    fn permissions_are_exact_strings() {
        let u = user(&[], &["member:delete"]);
        assert!(has_permission(&u, "member:delete"));
        assert!(!has_permission(&u, "member:create"));
    }

    #[test]
    fn admins_are_moderators() {
        assert!(is_moderator(&user(&["ADMIN"], &[])));
        assert!(is_moderator(&user(&["MODERATOR"], &[])));
        assert!(!is_moderator(&user(&["USER"], &[])));
    }
}
