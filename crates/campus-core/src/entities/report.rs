use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ReportKind, ReportStatus};

/// A lost-and-found report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LostFoundReport {
    pub id: String,
    pub user_id: String,
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub image_url: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
