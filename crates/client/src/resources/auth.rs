//! Authentication endpoints.

use serde::{Deserialize, Serialize};
use serde_json::json;

use memadmin_auth::TokenPair;
use memadmin_core::{ClientResult, User};

use crate::http::HttpClient;
use crate::resources::common::{MessageResponse, ResetTokenCheck};

/// `/auth/*` client.
#[derive(Clone)]
pub struct AuthApi {
    http: HttpClient,
}

/// Body of a successful login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl LoginResponse {
    pub fn token_pair(&self) -> TokenPair {
        TokenPair::new(&self.access_token, &self.refresh_token)
    }
}

/// Self-service registration payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl AuthApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Exchange credentials for a token pair.
    ///
    /// No client-side credential validation beyond presence; invalid
    /// credentials are the backend's verdict to give.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        self.http
            .post("/auth/login", &json!({ "username": username, "password": password }))
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<MessageResponse> {
        self.http.post("/auth/register", request).await
    }

    /// Force a token refresh now, through the same single refresh path the
    /// 401 interception uses.
    pub async fn refresh(&self) -> ClientResult<()> {
        self.http.refresh_tokens().await
    }

    /// Current user identity, fresh from the backend.
    pub async fn me(&self) -> ClientResult<User> {
        self.http.get("/auth/me").await
    }

    pub async fn forgot_password(&self, email: &str) -> ClientResult<MessageResponse> {
        self.http
            .post("/auth/forgot-password", &json!({ "email": email }))
            .await
    }

    pub async fn validate_reset_token(&self, token: &str) -> ClientResult<ResetTokenCheck> {
        self.http
            .post("/auth/validate-reset-token", &json!({ "token": token }))
            .await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> ClientResult<MessageResponse> {
        self.http
            .post(
                "/auth/reset-password",
                &json!({ "token": token, "newPassword": new_password }),
            )
            .await
    }

    /// Server-side revocation of every device session except the current
    /// one. Contrast with a local logout, which never calls the backend.
    pub async fn logout_all(&self) -> ClientResult<MessageResponse> {
        self.http.post_empty("/auth/logout-all").await
    }
}
