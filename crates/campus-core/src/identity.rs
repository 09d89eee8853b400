use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Authenticated user identity for cross-crate passing.
///
/// Produced by `campus-auth` when a session token resolves, consumed by the
/// server extractors and CLI commands. Carries no auth logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuthIdentity {
    /// Account ID; also the ID of the user's profile row.
    pub user_id: String,
    /// Login email, lower-cased.
    pub email: String,
}
