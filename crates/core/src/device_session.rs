//! Device session records (one per logged-in device).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::SessionId;

/// A device session as listed by the backend.
///
/// The backend caps concurrent sessions at 5 per user and evicts the oldest
/// on overflow; this client only observes the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSession {
    pub id: SessionId,
    pub device_info: String,
    pub ip_address: String,
    pub issued_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    #[serde(default)]
    pub is_current: bool,
}

/// Response of a session revocation.
///
/// When the revoked record was the caller's own session, the client must
/// follow up with a local logout; the tokens it holds are now dead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeResponse {
    #[serde(default)]
    pub is_current_session: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
