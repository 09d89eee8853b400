//! Study group handlers, including the group chat.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use campus_core::errors::CoreError;
use campus_db::repos::NewStudyGroup;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::SharedState;
use crate::utils::PageQuery;

#[derive(Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    content: String,
    #[serde(default)]
    attachments: Vec<String>,
}

pub async fn list_groups_handler(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.service.list_study_groups(state.page(&query)).await?,
    ))
}

pub async fn create_group_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(new): Json<NewStudyGroup>,
) -> Result<impl IntoResponse, ApiError> {
    let group = state.service.create_study_group(user.id(), &new).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn get_group_handler(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.get_study_group(&group_id).await?))
}

pub async fn join_group_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.service.join_study_group(&group_id, user.id()).await?,
    ))
}

pub async fn leave_group_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.service.leave_study_group(&group_id, user.id()).await?,
    ))
}

pub async fn close_group_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.service.close_study_group(user.id(), &group_id).await?,
    ))
}

/// Chat history, newest first. Members only.
pub async fn list_messages_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(group_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.service.is_group_member(&group_id, user.id()).await? {
        state.service.get_study_group(&group_id).await?;
        return Err(CoreError::Forbidden(format!("not a member of study group {group_id}")).into());
    }
    let messages = state
        .service
        .list_messages(&group_id, state.message_page(&query))
        .await?;
    Ok(Json(messages))
}

pub async fn send_message_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(group_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state
        .service
        .send_message(&group_id, user.id(), &req.content, &req.attachments)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
