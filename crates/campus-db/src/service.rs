//! Service layer orchestrating database mutations and change publication.
//!
//! `CampusService` wraps `CampusDb` (raw database access) and `ChangeFeed`
//! (realtime fan-out). All repo methods are implemented as
//! `impl CampusService` in [`crate::repos`].

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

use campus_core::enums::Table;
use campus_core::realtime::{ChangeEvent, ChangeFilter, ChangeKind};

use crate::CampusDb;
use crate::error::DatabaseError;
use crate::feed::{ChangeFeed, Subscription};

/// Default buffered events per subscriber.
pub const DEFAULT_FEED_CAPACITY: usize = 256;

/// Orchestrates database mutations with change publication.
///
/// Every mutation method follows this protocol:
/// 1. Take the write lock
/// 2. Begin a transaction when more than one statement must apply together
/// 3. Check ownership and state, execute SQL
/// 4. Commit
/// 5. Publish one change event per written row
///
/// Events are only published after commit, so subscribers never see rows
/// that were rolled back.
pub struct CampusService {
    db: CampusDb,
    feed: ChangeFeed,
    write_lock: Mutex<()>,
}

impl CampusService {
    /// Create a new service wrapping a local database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, feed_capacity: usize) -> Result<Self, DatabaseError> {
        let db = CampusDb::open_local(db_path).await?;
        Ok(Self::from_db(db, ChangeFeed::new(feed_capacity)))
    }

    /// Create a service backed by a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be reached.
    pub async fn new_remote(
        url: &str,
        auth_token: &str,
        feed_capacity: usize,
    ) -> Result<Self, DatabaseError> {
        let db = CampusDb::open_remote(url, auth_token).await?;
        Ok(Self::from_db(db, ChangeFeed::new(feed_capacity)))
    }

    /// Create from an existing `CampusDb` and feed (for testing).
    #[must_use]
    pub fn from_db(db: CampusDb, feed: ChangeFeed) -> Self {
        Self {
            db,
            feed,
            write_lock: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &CampusDb {
        &self.db
    }

    #[must_use]
    pub const fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Open a realtime channel receiving committed changes that match `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: ChangeFilter) -> Subscription {
        self.feed.subscribe(filter)
    }

    // -----------------------------------------------------------------------
    // Write protocol
    // -----------------------------------------------------------------------

    /// Serialize writers on the shared connection.
    pub(crate) async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub(crate) async fn begin(&self) -> Result<(), DatabaseError> {
        self.db.conn().execute("BEGIN IMMEDIATE", ()).await?;
        Ok(())
    }

    /// Commit on success, roll back on error. The caller must hold the write guard.
    pub(crate) async fn finish<T>(
        &self,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.db.conn().execute("COMMIT", ()).await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.db.conn().execute("ROLLBACK", ()).await {
                    tracing::error!(error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Publish one committed change.
    pub(crate) fn publish<T: Serialize>(
        &self,
        table: Table,
        kind: ChangeKind,
        id: &str,
        record: &T,
    ) -> Result<(), DatabaseError> {
        let event = ChangeEvent::new(table, kind, id, record)?;
        self.feed.publish(event);
        Ok(())
    }
}
