//! Landing page and health check.

use std::sync::atomic::Ordering;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

use crate::state::SharedState;

const LANDING_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Campus Hub</title></head>
<body>
  <h1>Campus Hub</h1>
  <p>Books, lost &amp; found, study groups, and chat for your campus.</p>
  <p>Sign in through <code>POST /api/auth/signin</code>, then open <a href="/dashboard">the dashboard</a>.</p>
</body>
</html>
"#;

pub async fn landing_handler() -> impl IntoResponse {
    Html(LANDING_PAGE)
}

pub async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "ok",
        "ws_connections": state.ws_connection_count.load(Ordering::Relaxed),
        "subscribers": state.service.feed().subscriber_count(),
    });
    (StatusCode::OK, axum::Json(body))
}
