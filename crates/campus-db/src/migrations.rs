//! Versioned schema migrations.
//!
//! SQL files are embedded at compile time. Each applied version is recorded
//! in `schema_migrations`, so reopening a database only runs what is new.

use crate::CampusDb;
use crate::error::DatabaseError;

/// `(version, name, sql)` in apply order.
const MIGRATIONS: &[(i64, &str, &str)] = &[(
    1,
    "initial",
    include_str!("../migrations/001_initial.sql"),
)];

impl CampusDb {
    /// Apply every embedded migration newer than the recorded version.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS schema_migrations (
                     version INTEGER PRIMARY KEY,
                     name TEXT NOT NULL,
                     applied_at TEXT NOT NULL DEFAULT (datetime('now'))
                 )",
                (),
            )
            .await
            .map_err(|e| DatabaseError::Migration(format!("schema_migrations: {e}")))?;

        let current = self.schema_version().await?;
        for (version, name, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{version:03}_{name}: {e}")))?;
            self.conn
                .execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    libsql::params![*version, *name],
                )
                .await
                .map_err(|e| DatabaseError::Migration(format!("{version:03}_{name}: {e}")))?;
            tracing::info!(version, name, "applied migration");
        }
        Ok(())
    }

    /// Highest applied migration version, 0 for a fresh database.
    pub async fn schema_version(&self) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT COALESCE(MAX(version), 0) FROM schema_migrations", ())
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get::<i64>(0)?),
            None => Ok(0),
        }
    }
}
