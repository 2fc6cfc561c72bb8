//! Auth handlers and supporting modules.
//!
//! This module holds the pieces the login flow is built from: password
//! hashing, the session store and its cookie, and the authenticator that
//! turns a username/password pair into a grant or a denial.
//!
//! ## Enumeration resistance
//!
//! Denials never say which part failed. An unknown username, a disabled
//! account, and a wrong password all produce the same client-visible
//! response; the specific reason only shows up in logs. The unknown-user
//! path even runs a dummy hash verification so it costs about as much as a
//! real one.

pub(crate) mod authenticator;
pub(crate) mod password;
pub(crate) mod principal;
pub(crate) mod session;
mod state;

pub use principal::Principal;
pub use state::{AuthConfig, AuthState};
