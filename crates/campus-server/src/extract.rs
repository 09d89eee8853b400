//! Session extraction: `Authorization: Bearer <token>` or the session cookie.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use campus_core::identity::AuthIdentity;

use crate::error::ApiError;
use crate::state::SharedState;

/// The signed-in caller. Rejects with 401 when no live session is presented.
///
/// Take `Option<CurrentUser>` to handle the anonymous case yourself.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub identity: AuthIdentity,
    pub token: String,
}

impl CurrentUser {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.identity.user_id
    }
}

/// Pull the raw session token from a request. The bearer header wins.
#[must_use]
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().trim().to_string())
        .filter(|t| !t.is_empty())
}

#[axum::async_trait]
impl FromRequestParts<SharedState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.config.auth.cookie_name)
            .ok_or(ApiError::Unauthorized)?;
        let identity = state
            .auth
            .current_user(&token)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        Ok(Self { identity, token })
    }
}
