//! Cross-cutting error types for Campus Hub.
//!
//! Storage-specific errors (`DatabaseError`, `StorageError`, `AuthError`) live in
//! their own crates and wrap `CoreError` where a domain rule was violated.

use thiserror::Error;

/// Errors that can be raised by any Campus Hub crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Input failed validation (missing required field, bad format, range).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller does not own the row it tried to mutate.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The request conflicts with current state (duplicate, full, closed).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
