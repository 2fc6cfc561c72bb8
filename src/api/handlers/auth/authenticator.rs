//! The login decision: look up the user, check the account, verify the password.

use crate::store::{CredentialStore, StoreError};

use super::password::{DUMMY_HASH, verify_password};
use super::principal::Principal;

/// Why a login attempt was denied. Only logs see the distinction; every kind
/// collapses to the same generic response for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DenyReason {
    UserNotFound,
    AccountDisabled,
    BadCredentials,
}

#[derive(Debug)]
pub(crate) enum LoginOutcome {
    Granted(Principal),
    Denied(DenyReason),
}

/// Decide a login attempt against the credential store.
///
/// The unknown-user path verifies against a throwaway hash so its timing
/// matches the wrong-password path. Disabled accounts are denied before the
/// password is checked.
///
/// # Errors
/// Returns an error when the store cannot be reached; denials are not errors.
pub(crate) async fn authenticate(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
) -> Result<LoginOutcome, StoreError> {
    let Some(record) = store.find_by_username(username).await? else {
        let _ = verify_password(password, DUMMY_HASH);
        return Ok(LoginOutcome::Denied(DenyReason::UserNotFound));
    };

    if !record.enabled {
        return Ok(LoginOutcome::Denied(DenyReason::AccountDisabled));
    }

    if !verify_password(password, &record.password) {
        return Ok(LoginOutcome::Denied(DenyReason::BadCredentials));
    }

    Ok(LoginOutcome::Granted(Principal {
        username: record.username,
        role: record.role,
        enabled: record.enabled,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::password::hash_password;
    use crate::store::{MemoryCredentialStore, UserRecord};

    async fn store_with_user(username: &str, password: &str, enabled: bool) -> MemoryCredentialStore {
        let store = MemoryCredentialStore::new();
        store
            .insert(UserRecord {
                username: username.to_string(),
                password: hash_password(password).unwrap(),
                enabled,
                role: "ADMIN".to_string(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn valid_credentials_grant_a_principal() {
        let store = store_with_user("alice", "secret1", true).await;

        let outcome = authenticate(&store, "alice", "secret1").await.unwrap();
        match outcome {
            LoginOutcome::Granted(principal) => {
                assert_eq!(principal.username, "alice");
                assert_eq!(principal.role, "ADMIN");
                assert!(principal.enabled);
            }
            LoginOutcome::Denied(reason) => panic!("expected grant, got {reason:?}"),
        }
    }

    #[tokio::test]
    async fn wrong_password_is_denied() {
        let store = store_with_user("alice", "secret1", true).await;

        let outcome = authenticate(&store, "alice", "wrong").await.unwrap();
        assert!(matches!(
            outcome,
            LoginOutcome::Denied(DenyReason::BadCredentials)
        ));
    }

    #[tokio::test]
    async fn unknown_user_is_denied() {
        let store = MemoryCredentialStore::new();

        let outcome = authenticate(&store, "nobody", "secret1").await.unwrap();
        assert!(matches!(
            outcome,
            LoginOutcome::Denied(DenyReason::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn disabled_account_is_denied_even_with_valid_password() {
        let store = store_with_user("mallory", "secret1", false).await;

        let outcome = authenticate(&store, "mallory", "secret1").await.unwrap();
        assert!(matches!(
            outcome,
            LoginOutcome::Denied(DenyReason::AccountDisabled)
        ));
    }
}
