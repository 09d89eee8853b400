//! Shared study resources repository.

use serde::{Deserialize, Serialize};

use campus_core::entities::Resource;
use campus_core::enums::{ResourceKind, Table};
use campus_core::errors::CoreError;
use campus_core::ids::PREFIX_RESOURCE;
use campus_core::page::Page;
use campus_core::realtime::ChangeKind;
use campus_core::validate;
use campus_core::views::ResourceView;

use crate::error::DatabaseError;
use crate::helpers::{
    author_at, fmt_datetime, now, parse_datetime, parse_enum, parse_string_list, to_json_list,
};
use crate::service::CampusService;

/// Fields of the resource upload form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResource {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub kind: ResourceKind,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub files: Vec<String>,
}

const SELECT_COLS: &str = "id, user_id, title, description, kind, course_code, files, \
     downloads, created_at, updated_at";
const RESOURCE_COLS: &str = "r.id, r.user_id, r.title, r.description, r.kind, r.course_code, \
     r.files, r.downloads, r.created_at, r.updated_at";

fn row_to_resource(row: &libsql::Row) -> Result<Resource, DatabaseError> {
    Ok(Resource {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        kind: parse_enum(&row.get::<String>(4)?)?,
        course_code: row.get(5)?,
        files: parse_string_list(&row.get::<String>(6)?)?,
        downloads: row.get(7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

impl CampusService {
    pub async fn create_resource(
        &self,
        user_id: &str,
        new: &NewResource,
    ) -> Result<Resource, DatabaseError> {
        let title = validate::require("title", &new.title)?;

        let _guard = self.write_guard().await;
        let id = self.db().generate_id(PREFIX_RESOURCE).await?;
        let now = now();

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO resources ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    user_id,
                    title,
                    new.description.trim(),
                    new.kind.as_str(),
                    new.course_code.trim(),
                    to_json_list(&new.files)?,
                    fmt_datetime(now),
                    fmt_datetime(now)
                ],
            )
            .await?;

        let resource = Resource {
            id,
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: new.description.trim().to_string(),
            kind: new.kind,
            course_code: new.course_code.trim().to_string(),
            files: new.files.clone(),
            downloads: 0,
            created_at: now,
            updated_at: now,
        };
        self.publish(Table::Resources, ChangeKind::Insert, &resource.id, &resource)?;
        Ok(resource)
    }

    pub async fn get_resource(&self, id: &str) -> Result<Resource, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM resources WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("resource", id))?;
        row_to_resource(&row)
    }

    /// Resources newest first, each with its owner.
    pub async fn list_resources(&self, page: Page) -> Result<Vec<ResourceView>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {RESOURCE_COLS}, a.id, a.full_name, a.avatar_url
                     FROM resources r LEFT JOIN profiles a ON a.id = r.user_id
                     ORDER BY r.created_at DESC, r.rowid DESC
                     LIMIT ?1 OFFSET ?2"
                ),
                libsql::params![i64::from(page.limit), i64::from(page.offset)],
            )
            .await?;

        let mut resources = Vec::new();
        while let Some(row) = rows.next().await? {
            resources.push(ResourceView {
                resource: row_to_resource(&row)?,
                owner: author_at(&row, 10)?,
            });
        }
        Ok(resources)
    }

    /// Count one download and return the updated row.
    pub async fn record_download(&self, resource_id: &str) -> Result<Resource, DatabaseError> {
        let _guard = self.write_guard().await;
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE resources SET downloads = downloads + 1, updated_at = ?1 WHERE id = ?2",
                libsql::params![fmt_datetime(now()), resource_id],
            )
            .await?;
        if changed == 0 {
            return Err(CoreError::not_found("resource", resource_id).into());
        }

        let updated = self.get_resource(resource_id).await?;
        self.publish(Table::Resources, ChangeKind::Update, &updated.id, &updated)?;
        Ok(updated)
    }
}
