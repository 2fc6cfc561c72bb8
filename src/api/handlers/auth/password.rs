//! Self-describing password hashes.
//!
//! Stored values carry a `{bcrypt}` prefix naming the algorithm, so records
//! written today keep verifying if a different algorithm is adopted later.

use bcrypt::{DEFAULT_COST, hash, verify};

const BCRYPT_PREFIX: &str = "{bcrypt}";

/// Well-formed hash verified when a username does not exist, so that path
/// costs a bcrypt verification like every real login attempt.
pub(super) const DUMMY_HASH: &str =
    "{bcrypt}$2a$10$0OsB8/8crrUzT9O8VNJF.uF2sB1c7tpvqJ/COY0Hm9qtoCETRa1cC";

/// Hash a plaintext password into the stored format.
///
/// # Errors
/// Returns an error if bcrypt fails to produce a hash.
pub(crate) fn hash_password(plaintext: &str) -> Result<String, bcrypt::BcryptError> {
    let digest = hash(plaintext, DEFAULT_COST)?;
    Ok(format!("{BCRYPT_PREFIX}{digest}"))
}

/// Verify a plaintext password against a stored hash string.
///
/// Unknown prefixes and malformed hashes never error, they simply fail to
/// verify.
pub(super) fn verify_password(plaintext: &str, stored: &str) -> bool {
    let Some(digest) = stored.strip_prefix(BCRYPT_PREFIX) else {
        return false;
    };
    verify(plaintext, digest).unwrap_or(false)
}
