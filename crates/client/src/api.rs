//! The API facade: one constructor, one resource client per backend area.

use std::sync::Arc;

use memadmin_auth::TokenStore;
use memadmin_core::ClientResult;
use memadmin_events::NotificationBus;

use crate::config::ClientConfig;
use crate::http::HttpClient;
use crate::resources::auth::AuthApi;
use crate::resources::jobs::JobsApi;
use crate::resources::members::MembersApi;
use crate::resources::profile::ProfileApi;
use crate::resources::roles::RolesApi;
use crate::resources::sessions::SessionsApi;
use crate::resources::users::UsersApi;

/// Entry point bundling every resource client over one shared HTTP client.
///
/// Cheap to clone; clones share the underlying connection pool, token store,
/// and bus.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
        bus: NotificationBus,
    ) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config, tokens, bus)?,
        })
    }

    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.http.clone())
    }

    pub fn profile(&self) -> ProfileApi {
        ProfileApi::new(self.http.clone())
    }

    pub fn members(&self) -> MembersApi {
        MembersApi::new(self.http.clone())
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.http.clone())
    }

    pub fn roles(&self) -> RolesApi {
        RolesApi::new(self.http.clone())
    }

    pub fn sessions(&self) -> SessionsApi {
        SessionsApi::new(self.http.clone())
    }

    pub fn jobs(&self) -> JobsApi {
        JobsApi::new(self.http.clone())
    }
}
