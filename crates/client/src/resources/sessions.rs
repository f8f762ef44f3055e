//! Device session management.

use reqwest::Method;

use memadmin_core::{ClientResult, DeviceSession, RevokeResponse, SessionId};

use crate::http::HttpClient;
use crate::resources::common::MessageResponse;

/// `/sessions` client.
#[derive(Clone)]
pub struct SessionsApi {
    http: HttpClient,
}

impl SessionsApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// All device sessions for the current user, one flagged `is_current`.
    ///
    /// The refresh token identifies which record is the caller's own; the
    /// backend cannot tell from the access token alone.
    pub async fn list(
        &self,
        current_refresh_token: Option<&str>,
    ) -> ClientResult<Vec<DeviceSession>> {
        let query = refresh_token_query(current_refresh_token);
        self.http.get_with_query("/sessions", &query).await
    }

    /// Revoke one device session.
    ///
    /// When the response flags `is_current_session`, the caller's own tokens
    /// just died server-side: a local logout must follow (after a short
    /// user-visible delay; the session manager owns that).
    pub async fn revoke(
        &self,
        id: SessionId,
        current_refresh_token: Option<&str>,
    ) -> ClientResult<RevokeResponse> {
        let query = refresh_token_query(current_refresh_token);
        self.http
            .request(Method::DELETE, &format!("/sessions/{id}"), &query, None)
            .await
    }

    /// Revoke every session except the current one.
    pub async fn logout_all(&self) -> ClientResult<MessageResponse> {
        self.http.post_empty("/auth/logout-all").await
    }
}

fn refresh_token_query(current_refresh_token: Option<&str>) -> Vec<(String, String)> {
    current_refresh_token
        .map(|token| vec![("currentRefreshToken".to_string(), token.to_string())])
        .unwrap_or_default()
}
