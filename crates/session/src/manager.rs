//! The session manager: startup check, login/logout, background refresh.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

use memadmin_auth::{TokenStore, expires_within};
use memadmin_client::ApiClient;
use memadmin_core::{ClientResult, RevokeResponse, SessionId, User};
use memadmin_events::{EventBus, Notification, NotificationBus};

use crate::state::SessionState;

/// Safety-net identity refresh cadence; keeps permissions current even if a
/// token-refresh notification is missed.
pub const IDENTITY_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Cadence of the proactive token-expiry inspection.
pub const EXPIRY_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// A token expiring within this window is refreshed before it dies.
pub const EXPIRY_THRESHOLD: chrono::Duration = chrono::Duration::minutes(2);

/// User-visible grace period between revoking one's own session and the
/// local logout that must follow.
pub const REVOKED_LOGOUT_DELAY: Duration = Duration::from_secs(2);

/// Owns the current identity and its background upkeep.
#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    bus: NotificationBus,
    state: SessionState,
    shutdown: Arc<Notify>,
    revoked_logout_delay: Duration,
}

impl SessionManager {
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>, bus: NotificationBus) -> Self {
        Self {
            api,
            tokens,
            bus,
            state: SessionState::new(),
            shutdown: Arc::new(Notify::new()),
            revoked_logout_delay: REVOKED_LOGOUT_DELAY,
        }
    }

    /// Override the revoked-session logout delay (tests).
    pub fn with_revoked_logout_delay(mut self, delay: Duration) -> Self {
        self.revoked_logout_delay = delay;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state.clone()
    }

    /// Startup check: if a persisted token exists, fetch identity; any
    /// failure clears the session. `is_loading()` flips false only after
    /// this completes, success or failure.
    pub async fn initialize(&self) {
        if self.tokens.access_token().is_some() {
            match self.api.auth().me().await {
                Ok(user) => {
                    tracing::info!(username = %user.username, "user authenticated");
                    self.state.set_user(Some(user));
                }
                Err(e) => {
                    tracing::warn!("session check failed, clearing stored tokens: {e}");
                    self.tokens.clear_all();
                    self.state.set_user(None);
                }
            }
        }
        self.state.finish_loading();
    }

    /// Exchange credentials for a token pair, persist it, then load the full
    /// identity. Credential format is not pre-validated; invalid
    /// credentials are the backend's verdict, surfaced unchanged.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<User> {
        let response = self.api.auth().login(username, password).await?;
        self.tokens.store(response.token_pair())?;

        let user = self.api.auth().me().await?;
        self.state.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Local-only logout: drops tokens and identity without calling the
    /// backend. Server-side revocation is `AuthApi::logout_all`.
    pub fn logout(&self) {
        self.tokens.clear_tokens();
        self.state.set_user(None);
        tracing::info!("logged out locally");
    }

    /// Re-fetch identity so server-side permission changes propagate
    /// without a re-login.
    ///
    /// A 401 here means the tokens are invalid (the HTTP client already
    /// spent its refresh attempt): clear the session. Anything else
    /// (network trouble, a 5xx) is logged and the session kept, to avoid
    /// spurious logouts on transient errors.
    pub async fn refresh_identity(&self) {
        if self.tokens.access_token().is_none() {
            return;
        }
        match self.api.auth().me().await {
            Ok(user) => {
                tracing::debug!("identity refreshed");
                self.state.set_user(Some(user));
            }
            Err(e) if e.is_auth_failure() => {
                tracing::error!("tokens invalid, clearing session");
                self.tokens.clear_all();
                self.state.set_user(None);
            }
            Err(e) => {
                tracing::warn!("failed to refresh identity: {e}");
            }
        }
    }

    /// Revoke a device session.
    ///
    /// Revoking the current session schedules a delayed local logout; the
    /// user gets a moment to read the confirmation before the redirect.
    pub async fn revoke_device_session(&self, id: SessionId) -> ClientResult<RevokeResponse> {
        let refresh_token = self.tokens.refresh_token();
        let response = self
            .api
            .sessions()
            .revoke(id, refresh_token.as_deref())
            .await?;

        if response.is_current_session {
            tracing::warn!("current session revoked, logging out shortly");
            let manager = self.clone();
            let delay = self.revoked_logout_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                manager.tokens.clear_all();
                manager.state.set_user(None);
            });
        }
        Ok(response)
    }

    /// Spawn the background worker:
    ///
    /// - identity refresh every 5 minutes (safety net);
    /// - token-expiry inspection every minute, issuing a benign
    ///   authenticated request when expiry is near so the HTTP client's
    ///   refresh path runs before the token actually dies;
    /// - immediate identity refresh on `TokenRefreshed`;
    /// - identity teardown on `ForcedLogout`.
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let manager = self.clone();

        tokio::spawn(async move {
            tracing::info!("session worker started");

            let mut subscription = manager.bus.subscribe();

            let now = tokio::time::Instant::now();
            let mut identity_interval = tokio::time::interval_at(
                now + IDENTITY_REFRESH_INTERVAL,
                IDENTITY_REFRESH_INTERVAL,
            );
            identity_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut expiry_interval =
                tokio::time::interval_at(now + EXPIRY_CHECK_INTERVAL, EXPIRY_CHECK_INTERVAL);
            expiry_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = manager.shutdown.notified() => break,
                    _ = identity_interval.tick() => {
                        manager.refresh_identity().await;
                    }
                    _ = expiry_interval.tick() => {
                        manager.check_token_expiry().await;
                    }
                    event = subscription.recv() => {
                        match event {
                            Ok(Notification::TokenRefreshed) => {
                                tracing::debug!("token refreshed, re-fetching identity");
                                manager.refresh_identity().await;
                            }
                            Ok(Notification::ForcedLogout) => {
                                tracing::error!("forced logout, dropping identity");
                                manager.state.set_user(None);
                            }
                            Ok(_) => {}
                            Err(_) => {}
                        }
                    }
                }
            }

            tracing::info!("session worker stopped");
        })
    }

    /// Request graceful shutdown of the worker.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    async fn check_token_expiry(&self) {
        let Some(token) = self.tokens.access_token() else {
            return;
        };

        match expires_within(&token, EXPIRY_THRESHOLD, Utc::now()) {
            Ok(true) => {
                tracing::warn!("access token expiring soon, refreshing proactively");
                // A benign authenticated request; the HTTP client's 401
                // interception does the real work. Its outcome is ignored;
                // failure lands on the usual fatal path by itself.
                let _ = self.api.auth().me().await;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("could not inspect access token: {e}");
            }
        }
    }
}
