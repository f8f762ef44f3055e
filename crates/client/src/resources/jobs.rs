//! Background job endpoints.

use reqwest::Method;
use serde_json::{Value, json};

use memadmin_core::{ClientResult, Job, JobId, JobType};

use crate::http::HttpClient;

/// `/jobs` client.
#[derive(Clone)]
pub struct JobsApi {
    http: HttpClient,
}

impl JobsApi {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Enqueue server-side work. Returns the job in PENDING state; progress
    /// is observed through polling, never driven from here.
    pub async fn create(&self, job_type: JobType, payload: Value) -> ClientResult<Job> {
        self.http
            .post(
                "/jobs",
                &json!({ "type": job_type, "payload": payload }),
            )
            .await
    }

    /// All jobs belonging to the current user.
    pub async fn list(&self) -> ClientResult<Vec<Job>> {
        self.http.get("/jobs").await
    }

    /// Jobs still in a non-terminal state.
    pub async fn active(&self) -> ClientResult<Vec<Job>> {
        self.http.get("/jobs/active").await
    }

    /// Request cooperative cancellation. Best-effort: a job already past its
    /// last cancellable checkpoint completes normally.
    pub async fn cancel(&self, id: JobId) -> ClientResult<()> {
        self.http
            .request_unit(Method::POST, &format!("/jobs/cancel/{id}"), &[], Some(json!({})))
            .await
    }

    /// Remove a terminal job from the visible list.
    pub async fn delete(&self, id: JobId) -> ClientResult<()> {
        self.http.delete(&format!("/jobs/{id}")).await
    }
}
