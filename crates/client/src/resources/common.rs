//! Response shapes shared across resources.

use serde::{Deserialize, Serialize};

/// Generic acknowledgement body (`{"message": "..."}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of checking a password-reset token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetTokenCheck {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
}
