//! Client configuration.

use std::time::Duration;

/// Connection settings for the API root.
///
/// Explicit and injectable: there is no ambient configuration. Whoever
/// constructs the client decides where it points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every path is resolved against, e.g.
    /// `https://registry.example.com/api/v1`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
