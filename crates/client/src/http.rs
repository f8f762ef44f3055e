//! Authenticated HTTP client with a single refresh-and-retry cycle.
//!
//! Contract:
//!
//! - Every request reads the access token from the store immediately before
//!   send and attaches it as a bearer credential. The header is never cached
//!   across requests; the pair may rotate between any two calls.
//! - On a 401, and only for a request that has not been retried yet, the
//!   client runs one refresh cycle: read the refresh token (absent ⇒ fatal),
//!   exchange it at `/auth/refresh`, persist the new pair, publish
//!   `TokenRefreshed`, and resubmit the exact original request once.
//! - A failed refresh is fatal: clear all persisted session state, publish
//!   `ForcedLogout`, surface `Unauthorized`. This path never loops; a 401
//!   on the retried request propagates as-is.
//! - Nothing else is retried. Network failures and 5xx propagate to the
//!   caller immediately.
//!
//! Concurrent 401s may each run an independent refresh; the server treats
//! refresh as idempotent, so no coalescing is done.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use memadmin_auth::{TokenPair, TokenStore};
use memadmin_core::{ClientError, ClientResult};
use memadmin_events::{EventBus, Notification, NotificationBus};

use crate::config::ClientConfig;
use crate::error_body;

/// The one component allowed to perform cross-cutting recovery.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenStore>,
    bus: NotificationBus,
}

/// Everything needed to resubmit a request exactly as first sent.
struct RequestPlan<'a> {
    method: Method,
    path: &'a str,
    query: &'a [(String, String)],
    body: Option<&'a Value>,
}

impl HttpClient {
    pub fn new(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
        bus: NotificationBus,
    ) -> ClientResult<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::network(e.to_string()))?;

        Ok(Self {
            inner,
            config,
            tokens,
            bus,
        })
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    // ─── public verbs ────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(Method::GET, path, &[], None).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ClientResult<T> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = to_body(body)?;
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// POST with an empty JSON body (toggle-style endpoints).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(Method::POST, path, &[], Some(Value::Object(Default::default())))
            .await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = to_body(body)?;
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.request_unit(Method::DELETE, path, &[], None).await
    }

    /// Issue a request and decode a JSON response.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> ClientResult<T> {
        let response = self
            .execute(RequestPlan {
                method,
                path,
                query,
                body: body.as_ref(),
            })
            .await?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ClientError::decode(e.to_string()))
        } else {
            Err(Self::map_failure(status, response).await)
        }
    }

    /// Issue a request, discarding any response body.
    pub async fn request_unit(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> ClientResult<()> {
        let response = self
            .execute(RequestPlan {
                method,
                path,
                query,
                body: body.as_ref(),
            })
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::map_failure(status, response).await)
        }
    }

    // ─── token lifecycle ─────────────────────────────────────────────────

    /// Run the refresh cycle explicitly (proactive refresh).
    ///
    /// Same single path the 401 interception uses; failure tears the
    /// session down identically.
    pub async fn refresh_tokens(&self) -> ClientResult<()> {
        self.refresh_and_persist().await
    }

    async fn execute(&self, plan: RequestPlan<'_>) -> ClientResult<reqwest::Response> {
        let response = self.send_once(&plan).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!(path = plan.path, "access token rejected, attempting refresh");
        self.refresh_and_persist().await?;

        // Exactly one resubmission. Whatever comes back (another 401
        // included) is final.
        self.send_once(&plan).await
    }

    async fn send_once(&self, plan: &RequestPlan<'_>) -> ClientResult<reqwest::Response> {
        let mut request = self.inner.request(plan.method.clone(), self.url(plan.path));
        if !plan.query.is_empty() {
            request = request.query(plan.query);
        }
        // Token read happens here, immediately before send.
        if let Some(token) = self.tokens.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = plan.body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))
    }

    async fn refresh_and_persist(&self) -> ClientResult<()> {
        let Some(refresh_token) = self.tokens.refresh_token() else {
            tracing::error!("no refresh token available, forcing logout");
            return Err(self.force_logout());
        };

        // The refresh call authenticates with the refresh token and goes out
        // bare; it must not pass through the 401 interception above.
        let outcome = self
            .inner
            .post(self.url("/auth/refresh"))
            .bearer_auth(refresh_token)
            .json(&Value::Object(Default::default()))
            .send()
            .await;

        let response = match outcome {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "token refresh rejected");
                return Err(self.force_logout());
            }
            Err(e) => {
                tracing::warn!("token refresh failed: {e}");
                return Err(self.force_logout());
            }
        };

        let pair: TokenPair = match response.json().await {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("token refresh returned an unreadable body: {e}");
                return Err(self.force_logout());
            }
        };

        self.tokens.store(pair)?;
        tracing::info!("token refreshed");
        self.bus.publish(Notification::TokenRefreshed);
        Ok(())
    }

    /// Unrecoverable authentication failure: tear the session down and tell
    /// the process. The caller still gets `Unauthorized` to propagate.
    fn force_logout(&self) -> ClientError {
        self.tokens.clear_all();
        self.bus.publish(Notification::ForcedLogout);
        ClientError::Unauthorized
    }

    async fn map_failure(status: StatusCode, response: reqwest::Response) -> ClientError {
        let body = response.text().await.unwrap_or_default();
        error_body::map_status(status, &body)
    }
}

fn to_body<B: Serialize>(body: &B) -> ClientResult<Value> {
    serde_json::to_value(body).map_err(|e| ClientError::decode(e.to_string()))
}
