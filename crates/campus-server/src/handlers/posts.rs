//! Campus feed: posts, likes, comments.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::SharedState;
use crate::utils::PageQuery;

#[derive(Deserialize)]
pub struct CreatePostRequest {
    content: String,
    #[serde(default)]
    images: Vec<String>,
}

#[derive(Deserialize)]
pub struct CommentRequest {
    content: String,
}

pub async fn list_posts_handler(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.list_posts(state.page(&query)).await?))
}

pub async fn create_post_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .service
        .create_post(user.id(), &req.content, &req.images)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn like_post_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.like_post(&post_id, user.id()).await?))
}

pub async fn unlike_post_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.unlike_post(&post_id, user.id()).await?))
}

pub async fn add_comment_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(post_id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state
        .service
        .add_comment(&post_id, user.id(), &req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
