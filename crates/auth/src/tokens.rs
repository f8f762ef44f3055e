//! Token pair persistence.
//!
//! The persisted client state is exactly: the access/refresh token pair plus
//! a language preference, under fixed keys. Everything else is re-fetched.
//! The store is injectable so the HTTP client and session manager never
//! touch ambient global state.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use memadmin_core::{ClientError, ClientResult};

/// The current access/refresh token pair.
///
/// Invariant: at most one pair per store. Replaced atomically on every
/// successful refresh; destroyed on logout, forced logout, or revocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Persistent storage for the token pair and the language preference.
///
/// Writers are login, the refresh path, and logout; readers are every
/// outbound request. Reads happen immediately before each use; the pair
/// may rotate between any two calls.
pub trait TokenStore: Send + Sync {
    /// The currently persisted pair, if any.
    fn load(&self) -> Option<TokenPair>;

    /// Replace the persisted pair.
    fn store(&self, pair: TokenPair) -> ClientResult<()>;

    /// Remove the token pair, keeping other persisted state (plain logout).
    fn clear_tokens(&self);

    /// Remove everything, language preference included (forced logout).
    fn clear_all(&self);

    fn language(&self) -> Option<String>;

    fn set_language(&self, language: &str) -> ClientResult<()>;

    fn access_token(&self) -> Option<String> {
        self.load().map(|pair| pair.access_token)
    }

    fn refresh_token(&self) -> Option<String> {
        self.load().map(|pair| pair.refresh_token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PersistedState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    language: Option<String>,
}

impl PersistedState {
    fn pair(&self) -> Option<TokenPair> {
        match (&self.access_token, &self.refresh_token) {
            (Some(access), Some(refresh)) => Some(TokenPair::new(access, refresh)),
            _ => None,
        }
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    state: Mutex<PersistedState>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Option<TokenPair> {
        self.state.lock().ok()?.pair()
    }

    fn store(&self, pair: TokenPair) -> ClientResult<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ClientError::storage("token store lock poisoned"))?;
        state.access_token = Some(pair.access_token);
        state.refresh_token = Some(pair.refresh_token);
        Ok(())
    }

    fn clear_tokens(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.access_token = None;
            state.refresh_token = None;
        }
    }

    fn clear_all(&self) {
        if let Ok(mut state) = self.state.lock() {
            *state = PersistedState::default();
        }
    }

    fn language(&self) -> Option<String> {
        self.state.lock().ok()?.language.clone()
    }

    fn set_language(&self, language: &str) -> ClientResult<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ClientError::storage("token store lock poisoned"))?;
        state.language = Some(language.to_string());
        Ok(())
    }
}

/// JSON-file-backed store.
///
/// The file holds the fixed keys `accessToken`, `refreshToken`, `language`.
/// Every read goes to disk so concurrent processes observe rotations.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional location under the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("memadmin").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> PersistedState {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return PersistedState::default(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("discarding unreadable session file: {e}");
                PersistedState::default()
            }
        }
    }

    fn write_state(&self, state: &PersistedState) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::storage(format!("create {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| ClientError::storage(format!("serialize session state: {e}")))?;
        std::fs::write(&self.path, json)
            .map_err(|e| ClientError::storage(format!("write {}: {e}", self.path.display())))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<TokenPair> {
        self.read_state().pair()
    }

    fn store(&self, pair: TokenPair) -> ClientResult<()> {
        let mut state = self.read_state();
        state.access_token = Some(pair.access_token);
        state.refresh_token = Some(pair.refresh_token);
        self.write_state(&state)
    }

    fn clear_tokens(&self) {
        let mut state = self.read_state();
        state.access_token = None;
        state.refresh_token = None;
        if let Err(e) = self.write_state(&state) {
            tracing::warn!("failed to clear persisted tokens: {e}");
        }
    }

    fn clear_all(&self) {
        if let Err(e) = self.write_state(&PersistedState::default()) {
            tracing::warn!("failed to clear session file: {e}");
        }
    }

    fn language(&self) -> Option<String> {
        self.read_state().language
    }

    fn set_language(&self, language: &str) -> ClientResult<()> {
        let mut state = self.read_state();
        state.language = Some(language.to_string());
        self.write_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_round_trips_the_pair() {
        let store = InMemoryTokenStore::new();
        assert!(store.load().is_none());

        store.store(TokenPair::new("access-1", "refresh-1")).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));

        // A second store replaces, never accumulates.
        store.store(TokenPair::new("access-2", "refresh-2")).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("access-2"));
    }

    #[test]
    fn clear_tokens_keeps_language() {
        let store = InMemoryTokenStore::new();
        store.store(TokenPair::new("a", "r")).unwrap();
        store.set_language("de").unwrap();

        store.clear_tokens();
        assert!(store.load().is_none());
        assert_eq!(store.language().as_deref(), Some("de"));

        store.clear_all();
        assert!(store.language().is_none());
    }

    #[test]
    fn file_store_persists_fixed_keys() {
        let path = std::env::temp_dir().join(format!("memadmin-test-{}.json", uuid::Uuid::now_v7()));
        let store = FileTokenStore::new(&path);

        store.store(TokenPair::new("access", "refresh")).unwrap();
        store.set_language("en").unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["accessToken"], "access");
        assert_eq!(raw["refreshToken"], "refresh");
        assert_eq!(raw["language"], "en");

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.access_token().as_deref(), Some("access"));

        reopened.clear_all();
        assert!(reopened.load().is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_or_corrupt_file_reads_as_empty() {
        let path = std::env::temp_dir().join(format!("memadmin-test-{}.json", uuid::Uuid::now_v7()));
        let store = FileTokenStore::new(&path);
        assert!(store.load().is_none());

        std::fs::write(&path, b"not json").unwrap();
        assert!(store.load().is_none());

        let _ = std::fs::remove_file(&path);
    }
}
