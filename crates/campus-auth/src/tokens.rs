//! Opaque session tokens. Only the SHA-256 of a token is ever persisted.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

use crate::error::AuthError;

const TOKEN_BYTES: usize = 32;

/// Generate a new URL-safe token from 32 random bytes.
///
/// # Errors
///
/// Returns `AuthError::Hashing` if the OS random source fails.
pub fn generate_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::Hashing(format!("failed to generate token: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Lookup key stored in `auth_sessions.token_hash`.
#[must_use]
pub fn hash_token(token: &str) -> String {
    STANDARD.encode(Sha256::digest(token.trim().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_url_safe_and_unique() {
        let a = generate_token().unwrap();
        let b = generate_token().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn hash_is_stable_and_ignores_surrounding_whitespace() {
        assert_eq!(hash_token("abc"), hash_token("abc\n"));
        assert_ne!(hash_token("abc"), hash_token("abd"));
        assert_ne!(hash_token("abc"), "abc");
    }
}
