//! `memadmin-session` — the auth session manager.
//!
//! Single source of truth for "who is the current user", with a lifecycle
//! independent of any one view: startup check, login/logout, periodic
//! identity refresh, proactive token-expiry checks, and reactions to the
//! HTTP client's token-lifecycle notifications.

pub mod capabilities;
pub mod manager;
pub mod state;

pub use manager::{
    EXPIRY_CHECK_INTERVAL, EXPIRY_THRESHOLD, IDENTITY_REFRESH_INTERVAL, REVOKED_LOGOUT_DELAY,
    SessionManager,
};
pub use state::SessionState;
