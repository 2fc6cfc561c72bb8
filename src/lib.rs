//! # Pordisto (form login service)
//!
//! `pordisto` is a small web application demonstrating form-based
//! authentication: a public landing page, login and signup forms, and a
//! private page that requires an authenticated session.
//!
//! ## Credentials
//!
//! Credentials live in a relational store behind the [`store::CredentialStore`]
//! trait. Passwords are stored as self-describing hash strings
//! (`{bcrypt}<salt+digest>`), never plaintext, so the hash algorithm can be
//! migrated later without breaking existing records.
//!
//! ## Sessions
//!
//! A successful login issues a random session token delivered in an
//! `HttpOnly` cookie. Only the SHA-256 hash of the token is kept server-side,
//! bound to the authenticated principal with an absolute TTL. The principal
//! itself is never persisted.
//!
//! ## Enumeration resistance
//!
//! Login failures (unknown user, disabled account, wrong password) are
//! indistinguishable to the client: all redirect to `/login?error`. Signup
//! failures collapse to `/signup?error` the same way. Only server-side logs
//! record the actual reason.

pub mod api;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
