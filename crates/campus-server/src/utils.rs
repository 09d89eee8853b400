//! Shared helpers for handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campus_core::page::Page;
use serde::Deserialize;

/// Build a standard JSON error response.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, axum::Json(body)).into_response()
}

/// `?limit=&offset=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageQuery {
    #[must_use]
    pub fn page(&self, default_limit: u32) -> Page {
        Page::from_query(self.limit, self.offset, default_limit)
    }
}
