//! Profile handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use campus_db::updates::ProfileUpdate;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::SharedState;

pub async fn get_own_profile_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.get_profile(user.id()).await?))
}

pub async fn update_own_profile_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.update_profile(user.id(), update).await?))
}

pub async fn get_profile_handler(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.get_profile(&user_id).await?))
}

/// Everyone the caller could start a direct conversation with.
pub async fn contacts_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.list_profiles_except(user.id()).await?))
}
