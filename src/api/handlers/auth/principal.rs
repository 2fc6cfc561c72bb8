//! Authenticated principal and the guard for protected routes.

use axum::http::HeaderMap;
use axum::response::Redirect;

use super::session::{extract_session_token, hash_session_token};
use super::state::AuthState;

/// User identity carried by a live session.
#[derive(Clone, Debug)]
pub struct Principal {
    pub username: String,
    pub role: String,
    pub enabled: bool,
}

/// Resolve the session cookie into a principal.
///
/// Anonymous or expired sessions land on the login page, without an error
/// flag: being asked to sign in is not an error.
pub(crate) async fn require_auth(
    headers: &HeaderMap,
    auth_state: &AuthState,
) -> Result<Principal, Redirect> {
    let Some(token) = extract_session_token(headers) else {
        return Err(Redirect::to("/login"));
    };

    let token_hash = hash_session_token(&token);
    match auth_state.sessions().resolve(&token_hash).await {
        Some(principal) => Ok(principal),
        None => Err(Redirect::to("/login")),
    }
}
