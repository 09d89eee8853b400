use campus_core::errors::CoreError;
use campus_db::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: run `campus auth login`")]
    NotAuthenticated,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already registered: {0}")]
    EmailTaken(String),

    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("{0}")]
    InvalidInput(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("database error: {0}")]
    Database(#[source] DatabaseError),
}

impl From<DatabaseError> for AuthError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Domain(CoreError::Validation(msg)) => Self::InvalidInput(msg),
            other => Self::Database(other),
        }
    }
}

impl From<CoreError> for AuthError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::InvalidInput(msg),
            other => Self::Database(DatabaseError::Domain(other)),
        }
    }
}
