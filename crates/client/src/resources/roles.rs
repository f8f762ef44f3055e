//! Role administration.

use memadmin_core::{ClientError, ClientResult, Role, RoleDraft, RoleId};

use crate::http::HttpClient;

/// `/admin/roles` client.
///
/// The backend exposes `DELETE /admin/roles/:id`, but role deletion is
/// deliberately unavailable from this client; the admin UI never offers
/// it, for any role.
#[derive(Clone)]
pub struct RolesApi {
    http: HttpClient,
}

impl RolesApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Role>> {
        self.http.get("/admin/roles").await
    }

    pub async fn get(&self, id: RoleId) -> ClientResult<Role> {
        self.http.get(&format!("/admin/roles/{id}")).await
    }

    pub async fn create(&self, draft: &RoleDraft) -> ClientResult<Role> {
        self.http.post("/admin/roles", draft).await
    }

    /// Update a role's description/permissions.
    ///
    /// System roles (and `ADMIN` by name) are refused before any request is
    /// issued. Soft check only; the backend enforces the real rule.
    pub async fn update(&self, role: &Role, draft: &RoleDraft) -> ClientResult<Role> {
        if role.is_protected() {
            return Err(ClientError::forbidden("System roles cannot be modified"));
        }
        self.http
            .put(&format!("/admin/roles/{}", role.id), draft)
            .await
    }

    /// All permission strings assignable to roles.
    pub async fn permissions(&self) -> ClientResult<Vec<String>> {
        self.http.get("/admin/roles/permissions").await
    }
}
