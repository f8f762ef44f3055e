//! Role entity for permission administration.

use serde::{Deserialize, Serialize};

use crate::id::RoleId;

/// A role with its granted permission set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub system_role: bool,
}

impl Role {
    /// Whether this role must not be edited or deleted from this client.
    ///
    /// The `ADMIN` role and anything the backend flags as a system role are
    /// locked. This is a soft, UI-level restriction; the backend enforces
    /// the real rule.
    pub fn is_protected(&self) -> bool {
        self.system_role || self.name == "ADMIN"
    }
}

/// Create/update payload for a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str, system_role: bool) -> Role {
        Role {
            id: RoleId::new(),
            name: name.to_string(),
            description: String::new(),
            permissions: vec![],
            system_role,
        }
    }

    #[test]
    fn admin_role_is_protected_even_without_flag() {
        assert!(role("ADMIN", false).is_protected());
    }

    #[test]
    fn system_flag_protects_any_name() {
        assert!(role("AUDITOR", true).is_protected());
        assert!(!role("AUDITOR", false).is_protected());
    }
}
