//! Capability gates for member-management controls.
//!
//! Create/update controls are always shown: the client never blocks those
//! actions, the backend enforces the real rule and answers 403 when it
//! disagrees. Deletion is gated on permission or admin role.

use crate::state::SessionState;

impl SessionState {
    /// Always true.
    // TODO: confirm with the backend owners whether `member:create` should
    // gate this instead of the show-everything policy.
    pub fn can_create_members(&self) -> bool {
        true
    }

    /// Always true, same policy (and open question) as `can_create_members`.
    pub fn can_update_members(&self) -> bool {
        true
    }

    pub fn can_delete_members(&self) -> bool {
        self.has_permission("member:delete") || self.is_admin()
    }
}
