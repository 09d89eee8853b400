//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// One week.
const fn default_session_ttl_hours() -> i64 {
    24 * 7
}

const fn default_min_password_length() -> usize {
    6
}

fn default_cookie_name() -> String {
    String::from("campus_session")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Lifetime of a session token issued at sign-in.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,

    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Cookie carrying the session token for browser clients.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the session cookie `Secure` (HTTPS only).
    #[serde(default)]
    pub cookie_secure: bool,

    /// Session token for CLI commands. Normally set through
    /// `CAMPUS_AUTH__TOKEN` rather than a file.
    #[serde(default)]
    pub token: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            min_password_length: default_min_password_length(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            token: String::new(),
        }
    }
}
