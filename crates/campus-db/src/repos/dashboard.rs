//! Dashboard overview counts.

use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::service::CampusService;

/// Headline numbers shown on the dashboard landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub available_books: i64,
    pub open_groups: i64,
    pub open_reports: i64,
    pub posts: i64,
    pub resources: i64,
    /// Study groups the caller belongs to.
    pub my_groups: i64,
}

impl CampusService {
    pub async fn dashboard_summary(&self, user_id: &str) -> Result<DashboardSummary, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT
                    (SELECT COUNT(*) FROM books WHERE status = 'available'),
                    (SELECT COUNT(*) FROM study_groups WHERE status != 'closed'),
                    (SELECT COUNT(*) FROM lost_found WHERE status = 'open'),
                    (SELECT COUNT(*) FROM posts),
                    (SELECT COUNT(*) FROM resources),
                    (SELECT COUNT(*) FROM study_group_members WHERE user_id = ?1)",
                [user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(DashboardSummary {
            available_books: row.get(0)?,
            open_groups: row.get(1)?,
            open_reports: row.get(2)?,
            posts: row.get(3)?,
            resources: row.get(4)?,
            my_groups: row.get(5)?,
        })
    }
}
