//! Auth configuration and in-process session state.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::principal::Principal;

const DEFAULT_SESSION_TTL_SECONDS: i64 = 12 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    public_base_url: String,
    session_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(public_base_url: String) -> Self {
        Self {
            public_base_url,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    pub(super) fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    pub(super) fn session_cookie_secure(&self) -> bool {
        self.public_base_url.starts_with("https://")
    }
}

struct SessionEntry {
    principal: Principal,
    created_at: Instant,
}

/// Sessions live in process memory, keyed by token hash. Entries past their
/// TTL are rejected on lookup and pruned whenever a new session is added.
pub(crate) struct SessionStore {
    ttl: Duration,
    entries: Mutex<HashMap<Vec<u8>, SessionEntry>>,
}

impl SessionStore {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Bind a principal to a token hash. Returns false when the hash is
    /// already taken so the caller can retry with a fresh token.
    pub(super) async fn insert(&self, token_hash: Vec<u8>, principal: Principal) -> bool {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.created_at.elapsed() < self.ttl);
        if entries.contains_key(&token_hash) {
            return false;
        }
        entries.insert(
            token_hash,
            SessionEntry {
                principal,
                created_at: Instant::now(),
            },
        );
        true
    }

    /// Resolve a token hash to its principal. Presenting a session does not
    /// extend its lifetime.
    pub(crate) async fn resolve(&self, token_hash: &[u8]) -> Option<Principal> {
        let entries = self.entries.lock().await;
        entries
            .get(token_hash)
            .filter(|entry| entry.created_at.elapsed() < self.ttl)
            .map(|entry| entry.principal.clone())
    }

    pub(super) async fn revoke(&self, token_hash: &[u8]) {
        let mut entries = self.entries.lock().await;
        entries.remove(token_hash);
    }
}

pub struct AuthState {
    config: AuthConfig,
    sessions: SessionStore,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let ttl = Duration::from_secs(u64::try_from(config.session_ttl_seconds()).unwrap_or(0));
        Self {
            config,
            sessions: SessionStore::new(ttl),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub(crate) fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
