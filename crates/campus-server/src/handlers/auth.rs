//! Sign-up, sign-in, sign-out, and the current session.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use campus_auth::SignUp;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SignInRequest {
    email: String,
    password: String,
}

pub async fn signup_handler(
    State(state): State<SharedState>,
    Json(form): Json<SignUp>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.auth.sign_up(&form).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn signin_handler(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(req): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.auth.sign_in(&req.email, &req.password).await?;
    let cookie = Cookie::build((state.config.auth.cookie_name.clone(), session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.auth.cookie_secure);
    Ok((jar.add(cookie), Json(session)))
}

pub async fn signout_handler(
    State(state): State<SharedState>,
    jar: CookieJar,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    state.auth.sign_out(&user.token).await?;
    let jar = jar.remove(Cookie::build((state.config.auth.cookie_name.clone(), "")).path("/"));
    Ok((jar, StatusCode::NO_CONTENT))
}

pub async fn me_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.service.find_profile(user.id()).await?;
    Ok(Json(serde_json::json!({
        "user": user.identity,
        "profile": profile,
    })))
}
