//! Session tokens and the cookie that carries them.
//!
//! The browser holds the raw token; the server keeps only its SHA-256 hash,
//! so a leaked session map never exposes usable cookies.

use anyhow::{Context, Result, anyhow};
use axum::{
    Extension,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, InvalidHeaderValue, SET_COOKIE},
    },
    response::{IntoResponse, Redirect},
};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::principal::Principal;
use super::state::{AuthConfig, AuthState};

pub(crate) const SESSION_COOKIE_NAME: &str = "pordisto_session";

/// Create a new session token for the auth cookie.
/// The raw value is only returned to set the cookie; the session map stores a hash.
pub(super) fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Hash a session token so raw values never sit in the session map.
/// The hash is used for lookups when the cookie is presented.
pub(crate) fn hash_session_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

/// Bind a principal to a fresh token and return the raw token for the cookie.
///
/// A clash on 32 random bytes is not expected; the retry keeps the binding
/// safe if one ever shows up.
pub(crate) async fn open_session(auth_state: &AuthState, principal: Principal) -> Result<String> {
    for _ in 0..3 {
        let token = generate_session_token()?;
        let token_hash = hash_session_token(&token);
        if auth_state.sessions().insert(token_hash, principal.clone()).await {
            return Ok(token);
        }
    }
    Err(anyhow!("failed to generate unique session token"))
}

/// Build a secure `HttpOnly` cookie for the session token.
pub(crate) fn session_cookie(
    auth_state: &AuthState,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = auth_state.config().session_ttl_seconds();
    // Only mark cookies secure when the site is served over HTTPS.
    let secure = auth_state.config().session_cookie_secure();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(auth_config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = auth_config.session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

/// Destroy the presented session and send the browser home.
pub async fn logout(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let Some(token) = extract_session_token(&headers) else {
        return Redirect::to("/login").into_response();
    };

    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(auth_state.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }

    let token_hash = hash_session_token(&token);
    if auth_state.sessions().resolve(&token_hash).await.is_none() {
        // Stale cookie: nothing to revoke, but clear it on the way out.
        return (response_headers, Redirect::to("/login")).into_response();
    }

    auth_state.sessions().revoke(&token_hash).await;

    (response_headers, Redirect::to("/")).into_response()
}
