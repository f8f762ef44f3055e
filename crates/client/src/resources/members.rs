//! Member CRUD and bulk operations.

use reqwest::Method;
use serde_json::json;

use memadmin_core::{ClientResult, Job, Member, MemberDraft, MemberId, Page, PageRequest};
use memadmin_validation::validate_member;

use crate::http::HttpClient;

/// `/members` client.
#[derive(Clone)]
pub struct MembersApi {
    http: HttpClient,
}

impl MembersApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Server-side paginated listing with an optional search filter.
    ///
    /// The search term is trimmed and dropped entirely when empty.
    pub async fn list(
        &self,
        page: &PageRequest,
        search: Option<&str>,
    ) -> ClientResult<Page<Member>> {
        let mut query = page.to_query();
        if let Some(term) = search {
            let term = term.trim();
            if !term.is_empty() {
                query.push(("search".to_string(), term.to_string()));
            }
        }
        self.http.get_with_query("/members", &query).await
    }

    pub async fn get(&self, id: MemberId) -> ClientResult<Member> {
        self.http.get(&format!("/members/{id}")).await
    }

    /// Create a member. The draft is validated client-side first; an invalid
    /// draft never reaches the network.
    pub async fn create(&self, draft: &MemberDraft) -> ClientResult<Member> {
        let report = validate_member(draft);
        if !report.is_valid() {
            return Err(report.into_error());
        }
        self.http.post("/members", draft).await
    }

    /// Update a member. Same validation gate as `create`.
    pub async fn update(&self, id: MemberId, draft: &MemberDraft) -> ClientResult<Member> {
        let report = validate_member(draft);
        if !report.is_valid() {
            return Err(report.into_error());
        }
        self.http.put(&format!("/members/{id}"), draft).await
    }

    pub async fn delete(&self, id: MemberId) -> ClientResult<()> {
        self.http.delete(&format!("/members/{id}")).await
    }

    /// Enqueue a bulk deletion. Returns immediately with a PENDING job; the
    /// actual deletion happens server-side and is observed via polling.
    pub async fn bulk_delete(&self, ids: &[MemberId]) -> ClientResult<Job> {
        self.http
            .request(
                Method::POST,
                "/members/bulk-delete",
                &[],
                Some(json!({ "ids": ids })),
            )
            .await
    }
}
