//! Realtime change feed over WebSocket.
//!
//! `GET /api/ws?table=messages&event=insert&filter=group_id=eq.grp-1`
//!
//! Group chat subscriptions must name one group the caller belongs to.
//! Direct message subscriptions only ever see the caller's own conversations.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campus_core::enums::Table;
use campus_core::errors::CoreError;
use campus_core::realtime::ChangeFilter;
use campus_db::{Notice, Subscription};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::{SharedState, WsEvent};
use crate::utils::api_error;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    table: String,
    event: Option<String>,
    filter: Option<String>,
}

/// One reserved connection slot. Dropping it frees the slot.
struct WsSlot(Arc<AtomicUsize>);

impl WsSlot {
    fn reserve(count: &Arc<AtomicUsize>, max: usize) -> Option<Self> {
        count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < max).then_some(n + 1)
            })
            .ok()?;
        Some(Self(Arc::clone(count)))
    }
}

impl Drop for WsSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
    user: CurrentUser,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    let filter = ChangeFilter::parse(&query.table, query.event.as_deref(), query.filter.as_deref())?;
    let filter = authorize(&state, user.id(), filter).await?;

    let max = state.config.server.max_ws_connections;
    let Some(slot) = WsSlot::reserve(&state.ws_connection_count, max) else {
        return Ok(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("too many WebSocket connections (max {max})"),
        ));
    };

    tracing::debug!(user_id = %user.id(), table = %filter.table, "realtime subscription");
    let subscription = state.service.subscribe(filter);
    Ok(ws
        .on_upgrade(move |socket| ws_connection(socket, slot, subscription))
        .into_response())
}

/// Narrow `filter` to rows `user_id` is allowed to see.
async fn authorize(
    state: &SharedState,
    user_id: &str,
    filter: ChangeFilter,
) -> Result<ChangeFilter, ApiError> {
    match filter.table {
        Table::Messages => {
            let group_id = filter
                .predicate
                .as_ref()
                .filter(|p| p.column == "group_id")
                .map(|p| p.value.clone())
                .ok_or_else(|| {
                    CoreError::Forbidden("messages require filter=group_id=eq.<group id>".into())
                })?;
            let group = state.service.get_study_group(&group_id).await?;
            if !group.is_member(user_id) {
                return Err(CoreError::Forbidden(format!("not a member of {group_id}")).into());
            }
            Ok(filter)
        }
        Table::DirectMessages => Ok(filter.scoped_to(["sender_id", "recipient_id"], user_id)),
        _ => Ok(filter),
    }
}

async fn send_event(socket: &mut WebSocket, event: &WsEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => socket.send(WsMessage::Text(json)).await.is_ok(),
        Err(error) => {
            tracing::warn!(%error, "failed to encode realtime event");
            true
        }
    }
}

/// Pings are answered by the socket itself; only close and errors matter here.
async fn ws_connection(mut socket: WebSocket, _slot: WsSlot, mut subscription: Subscription) {
    let subscribed = WsEvent::Subscribed {
        table: subscription.filter().table.to_string(),
    };
    if !send_event(&mut socket, &subscribed).await {
        return;
    }

    loop {
        tokio::select! {
            notice = subscription.recv() => {
                let event = match notice {
                    Some(Notice::Change(change)) => WsEvent::Change(change),
                    Some(Notice::Lagged(count)) => {
                        tracing::debug!(count, "ws client lagged");
                        WsEvent::EventsMissed { count }
                    }
                    None => break,
                };
                if !send_event(&mut socket, &event).await {
                    break; // client disconnected
                }
            }
            msg = socket.recv() => {
                if matches!(msg, Some(Ok(WsMessage::Close(_)) | Err(_)) | None) {
                    break;
                }
            }
        }
    }
}
