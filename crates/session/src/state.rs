//! Shared session state and authorization predicates.

use std::sync::{Arc, RwLock};

use memadmin_auth::predicates;
use memadmin_core::User;

#[derive(Debug)]
struct AuthState {
    user: Option<User>,
    loading: bool,
}

/// Cheap-to-clone handle on the current session state.
///
/// `is_loading() == true` means "identity unknown"; consumers must not
/// render auth-gated content until the startup check finished either way.
/// Every predicate returns `false` (never panics) while identity is absent.
#[derive(Debug, Clone)]
pub struct SessionState {
    inner: Arc<RwLock<AuthState>>,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AuthState {
                user: None,
                loading: true,
            })),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().map(|state| state.loading).unwrap_or(true)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .map(|state| state.user.is_some())
            .unwrap_or(false)
    }

    /// Snapshot of the current identity.
    pub fn current_user(&self) -> Option<User> {
        self.inner.read().ok()?.user.clone()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.with_user(|user| predicates::has_role(user, role))
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.with_user(|user| predicates::has_permission(user, permission))
    }

    pub fn is_admin(&self) -> bool {
        self.with_user(predicates::is_admin)
    }

    pub fn is_moderator(&self) -> bool {
        self.with_user(predicates::is_moderator)
    }

    pub(crate) fn set_user(&self, user: Option<User>) {
        if let Ok(mut state) = self.inner.write() {
            state.user = user;
        }
    }

    pub(crate) fn finish_loading(&self) {
        if let Ok(mut state) = self.inner.write() {
            state.loading = false;
        }
    }

    fn with_user(&self, f: impl FnOnce(&User) -> bool) -> bool {
        self.inner
            .read()
            .ok()
            .and_then(|state| state.user.as_ref().map(f))
            .unwrap_or(false)
    }
}
