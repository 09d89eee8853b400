//! Lost-and-found repository.

use serde::{Deserialize, Serialize};

use campus_core::entities::LostFoundReport;
use campus_core::enums::{ReportKind, ReportStatus, Table};
use campus_core::errors::CoreError;
use campus_core::ids::PREFIX_REPORT;
use campus_core::page::Page;
use campus_core::realtime::ChangeKind;
use campus_core::validate;
use campus_core::views::ReportView;

use crate::error::DatabaseError;
use crate::helpers::{author_at, fmt_datetime, get_opt_string, now, parse_datetime, parse_enum};
use crate::service::CampusService;

/// Fields of the lost-and-found report form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReport {
    pub kind: ReportKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

const SELECT_COLS: &str = "id, user_id, kind, title, description, location, category, \
     image_url, status, created_at, updated_at";
const REPORT_COLS: &str = "r.id, r.user_id, r.kind, r.title, r.description, r.location, \
     r.category, r.image_url, r.status, r.created_at, r.updated_at";

fn row_to_report(row: &libsql::Row) -> Result<LostFoundReport, DatabaseError> {
    Ok(LostFoundReport {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: parse_enum(&row.get::<String>(2)?)?,
        title: row.get(3)?,
        description: row.get(4)?,
        location: row.get(5)?,
        category: row.get(6)?,
        image_url: get_opt_string(row, 7)?,
        status: parse_enum(&row.get::<String>(8)?)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

impl CampusService {
    pub async fn create_report(
        &self,
        user_id: &str,
        new: &NewReport,
    ) -> Result<LostFoundReport, DatabaseError> {
        let title = validate::require("title", &new.title)?;
        let location = validate::require("location", &new.location)?;
        let image_url = new
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        let _guard = self.write_guard().await;
        let id = self.db().generate_id(PREFIX_REPORT).await?;
        let now = now();

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO lost_found ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
                ),
                libsql::params![
                    id.as_str(),
                    user_id,
                    new.kind.as_str(),
                    title,
                    new.description.trim(),
                    location,
                    new.category.trim(),
                    image_url,
                    ReportStatus::Open.as_str(),
                    fmt_datetime(now),
                    fmt_datetime(now)
                ],
            )
            .await?;

        let report = LostFoundReport {
            id,
            user_id: user_id.to_string(),
            kind: new.kind,
            title: title.to_string(),
            description: new.description.trim().to_string(),
            location: location.to_string(),
            category: new.category.trim().to_string(),
            image_url: image_url.map(String::from),
            status: ReportStatus::Open,
            created_at: now,
            updated_at: now,
        };
        self.publish(Table::LostFound, ChangeKind::Insert, &report.id, &report)?;
        Ok(report)
    }

    pub async fn get_report(&self, id: &str) -> Result<LostFoundReport, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM lost_found WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("report", id))?;
        row_to_report(&row)
    }

    /// Reports newest first, optionally narrowed by kind and status.
    pub async fn list_reports(
        &self,
        kind: Option<ReportKind>,
        status: Option<ReportStatus>,
        page: Page,
    ) -> Result<Vec<ReportView>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Some(kind) = kind {
            params.push(kind.as_str().into());
            clauses.push(format!("r.kind = ?{}", params.len()));
        }
        if let Some(status) = status {
            params.push(status.as_str().into());
            clauses.push(format!("r.status = ?{}", params.len()));
        }
        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        params.push(i64::from(page.limit).into());
        let limit_idx = params.len();
        params.push(i64::from(page.offset).into());
        let offset_idx = params.len();

        let sql = format!(
            "SELECT {REPORT_COLS}, a.id, a.full_name, a.avatar_url
             FROM lost_found r LEFT JOIN profiles a ON a.id = r.user_id
             {where_sql}
             ORDER BY r.created_at DESC, r.rowid DESC
             LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut reports = Vec::new();
        while let Some(row) = rows.next().await? {
            reports.push(ReportView {
                report: row_to_report(&row)?,
                reporter: author_at(&row, 11)?,
            });
        }
        Ok(reports)
    }

    /// Mark a report resolved. Only its author may do this, and only once.
    pub async fn resolve_report(
        &self,
        user_id: &str,
        report_id: &str,
    ) -> Result<LostFoundReport, DatabaseError> {
        let _guard = self.write_guard().await;
        let current = self.get_report(report_id).await?;
        if current.user_id != user_id {
            return Err(
                CoreError::Forbidden(format!("report {report_id} belongs to another user")).into(),
            );
        }
        if !current.status.can_transition_to(ReportStatus::Resolved) {
            return Err(CoreError::InvalidTransition {
                entity_type: "report".into(),
                id: report_id.to_string(),
                from: current.status.to_string(),
                to: ReportStatus::Resolved.to_string(),
            }
            .into());
        }

        self.db()
            .conn()
            .execute(
                "UPDATE lost_found SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![
                    ReportStatus::Resolved.as_str(),
                    fmt_datetime(now()),
                    report_id
                ],
            )
            .await?;

        let updated = self.get_report(report_id).await?;
        self.publish(Table::LostFound, ChangeKind::Update, &updated.id, &updated)?;
        Ok(updated)
    }
}
