//! Direct message handlers.

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
pub struct SendDirectRequest {
    content: String,
}

pub async fn list_conversations_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.list_conversations(user.id()).await?))
}

/// Messages exchanged with one peer, oldest first.
pub async fn get_conversation_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(peer_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state
        .service
        .list_conversation(user.id(), &peer_id, state.message_page(&query))
        .await?;
    Ok(Json(messages))
}

pub async fn send_direct_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(peer_id): Path<String>,
    Json(req): Json<SendDirectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state
        .service
        .send_direct_message(user.id(), &peer_id, &req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
