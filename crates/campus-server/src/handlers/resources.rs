//! Shared study resource handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use campus_db::repos::NewResource;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::SharedState;
use crate::utils::PageQuery;

pub async fn list_resources_handler(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.list_resources(state.page(&query)).await?))
}

pub async fn create_resource_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(new): Json<NewResource>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = state.service.create_resource(user.id(), &new).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

pub async fn download_resource_handler(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Path(resource_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.record_download(&resource_id).await?))
}
