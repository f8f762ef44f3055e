//! Admin user management.

use reqwest::Method;
use serde_json::json;

use memadmin_core::{ClientResult, Page, User, UserId, UserUpdate};

use crate::http::HttpClient;

/// `/admin/users` client.
#[derive(Clone)]
pub struct UsersApi {
    http: HttpClient,
}

impl UsersApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: u32, size: u32) -> ClientResult<Page<User>> {
        let query = [
            ("page".to_string(), page.to_string()),
            ("size".to_string(), size.to_string()),
        ];
        self.http.get_with_query("/admin/users", &query).await
    }

    pub async fn get(&self, id: UserId) -> ClientResult<User> {
        self.http.get(&format!("/admin/users/{id}")).await
    }

    pub async fn update(&self, id: UserId, update: &UserUpdate) -> ClientResult<User> {
        self.http.put(&format!("/admin/users/{id}"), update).await
    }

    pub async fn delete(&self, id: UserId) -> ClientResult<()> {
        self.http.delete(&format!("/admin/users/{id}")).await
    }

    pub async fn assign_roles(&self, id: UserId, roles: &[String]) -> ClientResult<()> {
        self.http
            .request_unit(
                Method::POST,
                &format!("/admin/users/{id}/roles"),
                &[],
                Some(json!({ "roles": roles })),
            )
            .await
    }

    pub async fn remove_roles(&self, id: UserId, roles: &[String]) -> ClientResult<()> {
        self.http
            .request_unit(
                Method::DELETE,
                &format!("/admin/users/{id}/roles"),
                &[],
                Some(json!({ "roles": roles })),
            )
            .await
    }

    /// Reconcile a user's roles to `desired`: assign the additions, then
    /// remove the leftovers. Two calls, assign first, so the user never
    /// transits through an empty role set.
    pub async fn set_roles(
        &self,
        id: UserId,
        current: &[String],
        desired: &[String],
    ) -> ClientResult<()> {
        let (added, removed) = diff_roles(current, desired);
        if !added.is_empty() {
            self.assign_roles(id, &added).await?;
        }
        if !removed.is_empty() {
            self.remove_roles(id, &removed).await?;
        }
        Ok(())
    }

    pub async fn enable(&self, id: UserId) -> ClientResult<()> {
        self.toggle(id, "enable").await
    }

    pub async fn disable(&self, id: UserId) -> ClientResult<()> {
        self.toggle(id, "disable").await
    }

    pub async fn unlock(&self, id: UserId) -> ClientResult<()> {
        self.toggle(id, "unlock").await
    }

    async fn toggle(&self, id: UserId, action: &str) -> ClientResult<()> {
        self.http
            .request_unit(
                Method::POST,
                &format!("/admin/users/{id}/{action}"),
                &[],
                Some(json!({})),
            )
            .await
    }
}

/// Compute the role-assignment diff: `(added, removed)` relative to
/// `current`. Order within each set follows the input order.
pub fn diff_roles(current: &[String], desired: &[String]) -> (Vec<String>, Vec<String>) {
    let added = desired
        .iter()
        .filter(|role| !current.contains(role))
        .cloned()
        .collect();
    let removed = current
        .iter()
        .filter(|role| !desired.contains(role))
        .cloned()
        .collect();
    (added, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diff_computes_added_and_removed_sets() {
        let current = roles(&["USER", "MODERATOR"]);
        let desired = roles(&["USER", "ADMIN"]);

        let (added, removed) = diff_roles(&current, &desired);
        assert_eq!(added, roles(&["ADMIN"]));
        assert_eq!(removed, roles(&["MODERATOR"]));
    }

    #[test]
    fn identical_sets_diff_to_nothing() {
        let current = roles(&["USER"]);
        let (added, removed) = diff_roles(&current, &current.clone());
        assert!(added.is_empty());
        assert!(removed.is_empty());
    }

    #[test]
    fn empty_current_adds_everything() {
        let (added, removed) = diff_roles(&[], &roles(&["USER", "ADMIN"]));
        assert_eq!(added.len(), 2);
        assert!(removed.is_empty());
    }
}
