//! The notifications that cross component boundaries.

use memadmin_core::{Job, JobId};

use crate::bus::BroadcastBus;

/// Process-wide notifications.
///
/// Three concerns share the bus: job lifecycle (created/completed), and the
/// token lifecycle raised by the HTTP client (refreshed/forced logout).
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A view just enqueued a background job; pollers should fetch now
    /// rather than waiting for their next cycle.
    JobCreated { job_id: JobId },

    /// A previously pending/in-progress job reached COMPLETED or FAILED.
    /// Carries the full final record so consumers can react without a fetch.
    JobCompleted { job: Box<Job> },

    /// The HTTP client rotated the token pair; identity may have changed
    /// server-side and should be re-fetched.
    TokenRefreshed,

    /// Unrecoverable authentication failure; session state has been cleared
    /// and the UI must return to the login entry point.
    ForcedLogout,
}

impl Notification {
    /// Stable kind tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::JobCreated { .. } => "jobs.created",
            Notification::JobCompleted { .. } => "jobs.completed",
            Notification::TokenRefreshed => "auth.token_refreshed",
            Notification::ForcedLogout => "auth.forced_logout",
        }
    }
}

/// The one bus instance shared across the client.
pub type NotificationBus = BroadcastBus<Notification>;
