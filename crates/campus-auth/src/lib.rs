//! # campus-auth
//!
//! Email and password accounts for Campus Hub.
//!
//! Passwords are hashed with argon2. Signing in issues an opaque random token
//! whose SHA-256 is stored in `auth_sessions`; the server accepts the token as
//! a cookie or bearer header. The CLI keeps its token in the OS keyring via
//! [`token_store`].

pub mod error;
pub mod password;
pub mod service;
pub mod token_store;
pub mod tokens;

pub use error::AuthError;
pub use service::{AuthService, Session, SignUp};

/// Resolve the CLI's stored session token.
///
/// Priority: keyring, env var, file. Does NOT check it against the database.
#[must_use]
pub fn resolve_token() -> Option<String> {
    token_store::load()
}

/// Clear stored CLI credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()
}
