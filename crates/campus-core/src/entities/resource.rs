use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ResourceKind;

/// A shared study resource (notes, scanned book, video, or external link).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub kind: ResourceKind,
    pub course_code: String,
    pub files: Vec<String>,
    pub downloads: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
