//! Account and session repository, used by the auth layer.
//!
//! Accounts carry credentials and are never exposed over the API; the public
//! side of a user is its [`Profile`](campus_core::entities::Profile).

use chrono::{DateTime, Utc};

use campus_core::entities::Profile;
use campus_core::enums::Table;
use campus_core::errors::CoreError;
use campus_core::ids::PREFIX_ACCOUNT;
use campus_core::realtime::ChangeKind;

use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, now, parse_datetime};
use crate::repos::profile::NewProfile;
use crate::service::CampusService;

/// A credential row. `email` is stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A server-side session. Only the token's hash is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token_hash: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    #[must_use]
    pub fn is_expired(&self, at: DateTime<Utc>) -> bool {
        self.expires_at <= at
    }
}

const ACCOUNT_COLS: &str = "id, email, password_hash, created_at";
const SESSION_COLS: &str = "token_hash, user_id, created_at, expires_at";

fn row_to_account(row: &libsql::Row) -> Result<Account, DatabaseError> {
    Ok(Account {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

fn row_to_session(row: &libsql::Row) -> Result<SessionRecord, DatabaseError> {
    Ok(SessionRecord {
        token_hash: row.get(0)?,
        user_id: row.get(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
        expires_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl CampusService {
    /// Create an account and its profile in one transaction.
    ///
    /// `email` must already be normalized. Fails with `Conflict` if the
    /// address is taken.
    pub async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
        profile: &NewProfile,
    ) -> Result<(Account, Profile), DatabaseError> {
        let _guard = self.write_guard().await;

        if self.find_account_by_email(email).await?.is_some() {
            return Err(CoreError::Conflict(format!("email already registered: {email}")).into());
        }

        let id = self.db().generate_id(PREFIX_ACCOUNT).await?;
        let created_at = now();

        self.begin().await?;
        let result = async {
            self.db()
                .conn()
                .execute(
                    &format!("INSERT INTO accounts ({ACCOUNT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
                    libsql::params![
                        id.as_str(),
                        email,
                        password_hash,
                        fmt_datetime(created_at)
                    ],
                )
                .await?;
            self.insert_profile(&id, profile, created_at).await
        }
        .await;
        let profile = self.finish(result).await?;

        tracing::info!(user_id = %id, "account created");
        self.publish(Table::Profiles, ChangeKind::Insert, &profile.id, &profile)?;

        Ok((
            Account {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at,
            },
            profile,
        ))
    }

    pub async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {ACCOUNT_COLS} FROM accounts WHERE email = ?1"),
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_account(&self, id: &str) -> Result<Account, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {ACCOUNT_COLS} FROM accounts WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("account", id))?;
        row_to_account(&row)
    }

    pub async fn insert_session(
        &self,
        token_hash: &str,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionRecord, DatabaseError> {
        let _guard = self.write_guard().await;
        let created_at = now();
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO auth_sessions ({SESSION_COLS}) VALUES (?1, ?2, ?3, ?4)"),
                libsql::params![
                    token_hash,
                    user_id,
                    fmt_datetime(created_at),
                    fmt_datetime(expires_at)
                ],
            )
            .await?;
        Ok(SessionRecord {
            token_hash: token_hash.to_string(),
            user_id: user_id.to_string(),
            created_at,
            expires_at,
        })
    }

    pub async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SESSION_COLS} FROM auth_sessions WHERE token_hash = ?1"),
                [token_hash],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete one session. Returns whether it existed.
    pub async fn delete_session(&self, token_hash: &str) -> Result<bool, DatabaseError> {
        let _guard = self.write_guard().await;
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM auth_sessions WHERE token_hash = ?1", [token_hash])
            .await?;
        Ok(deleted > 0)
    }

    /// Purge sessions that expired at or before `at`. Returns how many were removed.
    pub async fn delete_expired_sessions(&self, at: DateTime<Utc>) -> Result<u64, DatabaseError> {
        let _guard = self.write_guard().await;
        let deleted = self
            .db()
            .conn()
            .execute(
                "DELETE FROM auth_sessions WHERE expires_at <= ?1",
                [fmt_datetime(at)],
            )
            .await?;
        if deleted > 0 {
            tracing::debug!(deleted, "expired sessions purged");
        }
        Ok(deleted)
    }
}
