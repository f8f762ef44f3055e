//! Registry member entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::MemberId;

/// A registered member as the backend returns it.
///
/// Email uniqueness is enforced server-side; the client validates shape only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Create/update payload for a member.
///
/// This is what forms submit; it is validated client-side before any request
/// is issued (see `memadmin-validation`), and re-validated by the backend,
/// which is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl MemberDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }
}
