//! The dashboard gate: authenticated callers get section data, everyone else
//! is sent back to `/`.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::SharedState;
use crate::utils::PageQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Books,
    LostFound,
    StudyGroups,
    Feed,
    Chat,
    Resources,
    Profile,
}

impl Section {
    pub const ALL: &'static [Self] = &[
        Self::Books,
        Self::LostFound,
        Self::StudyGroups,
        Self::Feed,
        Self::Chat,
        Self::Resources,
        Self::Profile,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::LostFound => "lost-found",
            Self::StudyGroups => "study-groups",
            Self::Feed => "feed",
            Self::Chat => "chat",
            Self::Resources => "resources",
            Self::Profile => "profile",
        }
    }

    #[must_use]
    pub fn from_path(segment: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == segment)
    }
}

pub async fn dashboard_handler(
    State(state): State<SharedState>,
    user: Option<CurrentUser>,
) -> Result<Response, ApiError> {
    let Some(user) = user else {
        return Ok(Redirect::to("/").into_response());
    };
    let summary = state.service.dashboard_summary(user.id()).await?;
    let sections: Vec<&str> = Section::ALL.iter().map(|s| s.as_str()).collect();
    Ok(Json(serde_json::json!({
        "user": user.identity,
        "summary": summary,
        "sections": sections,
    }))
    .into_response())
}

pub async fn dashboard_section_handler(
    State(state): State<SharedState>,
    user: Option<CurrentUser>,
    Path(section): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let Some(user) = user else {
        return Ok(Redirect::to("/").into_response());
    };
    let section = Section::from_path(&section)
        .ok_or_else(|| ApiError::NotFound(format!("unknown dashboard section: {section}")))?;

    let page = state.page(&query);
    let svc = &state.service;
    let data = match section {
        Section::Books => serde_json::to_value(svc.list_books(None, page).await?),
        Section::LostFound => serde_json::to_value(svc.list_reports(None, None, page).await?),
        Section::StudyGroups => serde_json::to_value(svc.list_study_groups(page).await?),
        Section::Feed => serde_json::to_value(svc.list_posts(page).await?),
        Section::Resources => serde_json::to_value(svc.list_resources(page).await?),
        Section::Profile => serde_json::to_value(svc.get_profile(user.id()).await?),
        Section::Chat => {
            let groups = svc.list_member_groups(user.id(), page).await?;
            let conversations = svc.list_conversations(user.id()).await?;
            Ok(serde_json::json!({
                "groups": groups,
                "conversations": conversations,
            }))
        }
    }
    .map_err(|e| ApiError::Core(campus_core::errors::CoreError::Other(e.into())))?;

    Ok(Json(serde_json::json!({
        "section": section,
        "data": data,
    }))
    .into_response())
}
