//! Credential storage behind a swappable interface.
//!
//! Handlers only see [`CredentialStore`], so the Postgres-backed store and the
//! in-memory store used by tests stay interchangeable.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCredentialStore;
pub use postgres::PgCredentialStore;

/// A stored credential row. The username is the unique key, the password
/// field holds a self-describing hash string, never plaintext.
#[derive(Clone, Debug)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub enabled: bool,
    pub role: String,
}

/// Failures the store can report. Wording shown to end users is the
/// caller's job, these stay internal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already taken")]
    DuplicateUsername,
    #[error("credential store unavailable")]
    Unavailable(#[from] sqlx::Error),
}

/// Lookup and insert over stored credentials.
///
/// Absence is a value, not an error: a missing username resolves to
/// `Ok(None)`. Inserting an existing username reports
/// [`StoreError::DuplicateUsername`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn insert(&self, record: UserRecord) -> Result<(), StoreError>;

    /// Cheap liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
