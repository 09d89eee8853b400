//! Profile repository: one public profile per account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_core::entities::Profile;
use campus_core::enums::Table;
use campus_core::errors::CoreError;
use campus_core::realtime::ChangeKind;
use campus_core::validate;

use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, get_opt_string, now, parse_datetime};
use crate::service::CampusService;
use crate::updates::ProfileUpdate;

/// Fields collected by the sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub full_name: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub department: String,
}

const SELECT_COLS: &str = "id, full_name, avatar_url, department, student_id, phone, bio, \
     created_at, updated_at";

fn row_to_profile(row: &libsql::Row) -> Result<Profile, DatabaseError> {
    Ok(Profile {
        id: row.get(0)?,
        full_name: row.get(1)?,
        avatar_url: get_opt_string(row, 2)?,
        department: row.get(3)?,
        student_id: row.get(4)?,
        phone: row.get(5)?,
        bio: row.get(6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl CampusService {
    /// Insert the profile row for `user_id`. Caller holds the write guard.
    pub(crate) async fn insert_profile(
        &self,
        user_id: &str,
        new: &NewProfile,
        at: DateTime<Utc>,
    ) -> Result<Profile, DatabaseError> {
        let full_name = validate::require("full_name", &new.full_name)?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO profiles ({SELECT_COLS})
                     VALUES (?1, ?2, NULL, ?3, ?4, '', '', ?5, ?6)"
                ),
                libsql::params![
                    user_id,
                    full_name,
                    new.department.trim(),
                    new.student_id.trim(),
                    fmt_datetime(at),
                    fmt_datetime(at)
                ],
            )
            .await?;

        Ok(Profile {
            id: user_id.to_string(),
            full_name: full_name.to_string(),
            avatar_url: None,
            department: new.department.trim().to_string(),
            student_id: new.student_id.trim().to_string(),
            phone: String::new(),
            bio: String::new(),
            created_at: at,
            updated_at: at,
        })
    }

    /// Create the profile for an existing account that has none.
    pub async fn create_profile(
        &self,
        user_id: &str,
        new: &NewProfile,
    ) -> Result<Profile, DatabaseError> {
        let _guard = self.write_guard().await;

        self.get_account(user_id).await?;
        if self.find_profile(user_id).await?.is_some() {
            return Err(CoreError::Conflict(format!("profile already exists: {user_id}")).into());
        }

        let profile = self.insert_profile(user_id, new, now()).await?;
        self.publish(Table::Profiles, ChangeKind::Insert, &profile.id, &profile)?;
        Ok(profile)
    }

    pub async fn find_profile(&self, id: &str) -> Result<Option<Profile>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM profiles WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_profile(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_profile(&self, id: &str) -> Result<Profile, DatabaseError> {
        self.find_profile(id)
            .await?
            .ok_or_else(|| CoreError::not_found("profile", id).into())
    }

    /// Apply a partial update to the caller's own profile.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<Profile, DatabaseError> {
        let _guard = self.write_guard().await;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref full_name) = update.full_name {
            let full_name = validate::require("full_name", full_name)?;
            sets.push(format!("full_name = ?{idx}"));
            params.push(full_name.into());
            idx += 1;
        }
        if let Some(ref avatar_url) = update.avatar_url {
            sets.push(format!("avatar_url = ?{idx}"));
            params.push(avatar_url.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        for (column, value) in [
            ("department", &update.department),
            ("student_id", &update.student_id),
            ("phone", &update.phone),
            ("bio", &update.bio),
        ] {
            if let Some(value) = value {
                sets.push(format!("{column} = ?{idx}"));
                params.push(value.trim().into());
                idx += 1;
            }
        }

        if sets.is_empty() {
            return self.get_profile(user_id).await;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(fmt_datetime(now()).into());
        idx += 1;

        params.push(user_id.into());
        let sql = format!("UPDATE profiles SET {} WHERE id = ?{idx}", sets.join(", "));
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(CoreError::not_found("profile", user_id).into());
        }

        let updated = self.get_profile(user_id).await?;
        self.publish(Table::Profiles, ChangeKind::Update, &updated.id, &updated)?;
        Ok(updated)
    }

    /// Every profile except the caller's, by name. Drives the chat contact list.
    pub async fn list_profiles_except(&self, user_id: &str) -> Result<Vec<Profile>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM profiles WHERE id != ?1
                     ORDER BY full_name COLLATE NOCASE, id"
                ),
                [user_id],
            )
            .await?;

        let mut profiles = Vec::new();
        while let Some(row) = rows.next().await? {
            profiles.push(row_to_profile(&row)?);
        }
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{create_user, test_service};
    use crate::updates::ProfileUpdateBuilder;

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let before = svc.get_profile(&ada).await.unwrap();

        let updated = svc
            .update_profile(
                &ada,
                ProfileUpdateBuilder::new()
                    .phone("+1 555 0100")
                    .bio("  Math tutor  ")
                    .avatar_url(Some("http://x/avatars/a.png".into()))
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(updated.full_name, before.full_name);
        assert_eq!(updated.phone, "+1 555 0100");
        assert_eq!(updated.bio, "Math tutor");
        assert_eq!(updated.avatar_url.as_deref(), Some("http://x/avatars/a.png"));
        assert!(updated.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn empty_update_is_a_read() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let before = svc.get_profile(&ada).await.unwrap();
        let after = svc.update_profile(&ada, ProfileUpdate::default()).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let err = svc
            .update_profile(&ada, ProfileUpdateBuilder::new().full_name("  ").build())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Domain(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn contacts_exclude_caller() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let bob = create_user(&svc, "bob").await;
        let cyd = create_user(&svc, "cyd").await;

        let contacts: Vec<String> = svc
            .list_profiles_except(&ada)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(contacts, vec![bob, cyd]);
    }

    #[tokio::test]
    async fn create_profile_rejects_duplicates_and_unknown_accounts() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let new = NewProfile {
            full_name: "Ada again".into(),
            ..Default::default()
        };
        assert!(matches!(
            svc.create_profile(&ada, &new).await.unwrap_err(),
            DatabaseError::Domain(CoreError::Conflict(_))
        ));
        assert!(svc
            .create_profile("usr-00000000", &new)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let svc = test_service().await;
        assert!(svc.get_profile("usr-00000000").await.unwrap_err().is_not_found());
    }
}
