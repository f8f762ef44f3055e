//! Own-profile endpoints.

use serde_json::json;

use memadmin_core::{ClientResult, User, UserUpdate};

use crate::http::HttpClient;
use crate::resources::common::MessageResponse;

/// `/profile` client.
#[derive(Clone)]
pub struct ProfileApi {
    http: HttpClient,
}

impl ProfileApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn get(&self) -> ClientResult<User> {
        self.http.get("/profile").await
    }

    pub async fn update(&self, update: &UserUpdate) -> ClientResult<User> {
        self.http.put("/profile", update).await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> ClientResult<MessageResponse> {
        self.http
            .post(
                "/profile/change-password",
                &json!({
                    "currentPassword": current_password,
                    "newPassword": new_password,
                }),
            )
            .await
    }
}
