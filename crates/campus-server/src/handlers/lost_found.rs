//! Lost-and-found report handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use campus_core::enums::{ReportKind, ReportStatus};
use campus_db::repos::NewReport;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::SharedState;
use crate::utils::PageQuery;

#[derive(Deserialize)]
pub struct ReportFilter {
    kind: Option<ReportKind>,
    status: Option<ReportStatus>,
}

pub async fn list_reports_handler(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Query(query): Query<PageQuery>,
    Query(filter): Query<ReportFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let reports = state
        .service
        .list_reports(filter.kind, filter.status, state.page(&query))
        .await?;
    Ok(Json(reports))
}

pub async fn create_report_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Json(new): Json<NewReport>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.service.create_report(user.id(), &new).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn resolve_report_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.service.resolve_report(user.id(), &report_id).await?,
    ))
}
