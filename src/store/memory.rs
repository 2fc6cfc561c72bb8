//! In-memory credential store.
//!
//! Keeps the same contract as the Postgres store, including the
//! duplicate-username failure, so routes can be exercised without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{CredentialStore, StoreError, UserRecord};

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.lock().await;
        Ok(users.get(username).cloned())
    }

    async fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.lock().await;
        if users.contains_key(&record.username) {
            return Err(StoreError::DuplicateUsername);
        }
        users.insert(record.username.clone(), record);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
