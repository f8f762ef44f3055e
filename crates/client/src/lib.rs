//! `memadmin-client` — authenticated HTTP client and typed resource clients
//! for the member-registry backend.
//!
//! The HTTP client owns the token lifecycle: it decorates every request with
//! the current access token and transparently recovers from a single
//! expired-token failure (one refresh, one retry, then give up and force
//! logout). Resource clients translate UI intents into well-formed requests
//! and propagate errors untouched; all cross-cutting recovery lives in the
//! HTTP client.

pub mod api;
pub mod config;
pub mod error_body;
pub mod http;
pub mod resources;
pub mod sequence;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use http::HttpClient;
pub use resources::auth::{AuthApi, LoginResponse, RegisterRequest};
pub use resources::common::{MessageResponse, ResetTokenCheck};
pub use resources::jobs::JobsApi;
pub use resources::members::MembersApi;
pub use resources::profile::ProfileApi;
pub use resources::roles::RolesApi;
pub use resources::sessions::SessionsApi;
pub use resources::users::UsersApi;
pub use sequence::{FetchSequencer, FetchTicket};
