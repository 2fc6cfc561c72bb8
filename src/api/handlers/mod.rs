//! Route handlers and shared input validation.
//!
//! Pages are rendered inline; the interesting parts live in [`auth`], which
//! owns hashing, sessions, and the login decision.

pub mod auth;
pub mod health;
pub mod login;
pub mod private;
pub mod root;
pub mod signup;

use regex::Regex;
use serde::Deserialize;

const MAX_PASSWORD_LENGTH: usize = 256;

/// Query flag appended by failed form submissions (`/login?error`).
#[derive(Debug, Deserialize)]
pub struct ErrorFlag {
    error: Option<String>,
}

impl ErrorFlag {
    pub(crate) fn is_set(&self) -> bool {
        self.error.is_some()
    }
}

/// Usernames are short URL-safe identifiers so they can sit in pages and
/// logs without escaping.
pub fn valid_username(username: &str) -> bool {
    Regex::new(r"^[0-9A-Za-z_-]{1,64}$").is_ok_and(|re| re.is_match(username))
}

/// Passwords must be present and of sane size; strength policy is left to
/// the operator's signup instructions.
pub fn valid_password(password: &str) -> bool {
    !password.is_empty() && password.len() <= MAX_PASSWORD_LENGTH
}
