//! Server error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campus_auth::AuthError;
use campus_core::errors::CoreError;
use campus_db::DatabaseError;
use campus_storage::StorageError;
use thiserror::Error;

use crate::utils::api_error;

/// Failures while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A request failure, rendered as `{"error": "..."}` with a matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not authenticated")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

const fn core_status(error: &CoreError) -> StatusCode {
    match error {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Forbidden(_) => StatusCode::FORBIDDEN,
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::Conflict(_) | CoreError::InvalidTransition { .. } => StatusCode::CONFLICT,
        CoreError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

const fn database_status(error: &DatabaseError) -> StatusCode {
    match error {
        DatabaseError::Domain(e) => core_status(e),
        DatabaseError::NoResult => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Auth(e) => match e {
                AuthError::NotAuthenticated | AuthError::InvalidCredentials => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::EmailTaken(_) => StatusCode::CONFLICT,
                AuthError::WeakPassword { .. } | AuthError::InvalidInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::Database(e) => database_status(e),
                AuthError::Hashing(_) | AuthError::TokenStoreError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Database(e) => database_status(e),
            Self::Storage(e) => match e {
                StorageError::UnknownBucket(_) | StorageError::InvalidPath(_) => {
                    StatusCode::BAD_REQUEST
                }
                StorageError::NotFound(_) => StatusCode::NOT_FOUND,
                StorageError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Core(e) => core_status(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            return api_error(status, "internal server error");
        }
        tracing::debug!(%status, error = %self, "request rejected");
        api_error(status, self.to_string())
    }
}
