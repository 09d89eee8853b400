//! Sign-up, sign-in, and session resolution against the campus database.

use std::sync::Arc;

use campus_config::AuthConfig;
use campus_core::entities::Profile;
use campus_core::errors::CoreError;
use campus_core::identity::AuthIdentity;
use campus_core::validate;
use campus_db::CampusService;
use campus_db::repos::NewProfile;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use crate::tokens::{generate_token, hash_token};

/// Registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub department: String,
}

/// An issued session. `token` is only ever shown to the caller once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AuthService {
    service: Arc<CampusService>,
    config: AuthConfig,
}

impl AuthService {
    pub const fn new(service: Arc<CampusService>, config: AuthConfig) -> Self {
        Self { service, config }
    }

    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register an account and its profile.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed email or missing name, `WeakPassword`
    /// below the configured length, `EmailTaken` for a registered address.
    pub async fn sign_up(&self, form: &SignUp) -> Result<Profile, AuthError> {
        let email = validate::email(&form.email)?;
        self.check_password(&form.password)?;
        let full_name = validate::require("full_name", &form.full_name)?;

        let password_hash = hash_password(&form.password)?;
        let profile = NewProfile {
            full_name: full_name.to_string(),
            student_id: form.student_id.trim().to_string(),
            department: form.department.trim().to_string(),
        };

        match self
            .service
            .create_account(&email, &password_hash, &profile)
            .await
        {
            Ok((_, profile)) => Ok(profile),
            Err(e) if matches!(e.as_domain(), Some(CoreError::Conflict(_))) => {
                Err(AuthError::EmailTaken(email))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Verify credentials and issue a session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let Ok(email) = validate::email(email) else {
            return Err(AuthError::InvalidCredentials);
        };
        let Some(account) = self.service.find_account_by_email(&email).await? else {
            tracing::debug!(%email, "sign-in for unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, &account.password_hash) {
            tracing::debug!(user_id = %account.id, "sign-in with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_token()?;
        let expires_at = Utc::now() + Duration::hours(self.config.session_ttl_hours);
        let record = self
            .service
            .insert_session(&hash_token(&token), &account.id, expires_at)
            .await?;

        tracing::info!(user_id = %account.id, "signed in");
        Ok(Session {
            token,
            user_id: account.id,
            email: account.email,
            expires_at: record.expires_at,
        })
    }

    /// Resolve a token to its user. Unknown and expired tokens are `None`.
    pub async fn current_user(&self, token: &str) -> Result<Option<AuthIdentity>, AuthError> {
        if token.trim().is_empty() {
            return Ok(None);
        }
        let token_hash = hash_token(token);
        let Some(session) = self.service.find_session(&token_hash).await? else {
            return Ok(None);
        };
        if session.is_expired(Utc::now()) {
            self.service.delete_session(&token_hash).await?;
            return Ok(None);
        }
        let account = self.service.get_account(&session.user_id).await?;
        Ok(Some(AuthIdentity {
            user_id: account.id,
            email: account.email,
        }))
    }

    /// Like [`Self::current_user`] but absent is an error.
    pub async fn require_user(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        self.current_user(token)
            .await?
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Revoke a session. Returns whether the token was live.
    pub async fn sign_out(&self, token: &str) -> Result<bool, AuthError> {
        let removed = self.service.delete_session(&hash_token(token)).await?;
        if removed {
            tracing::info!("signed out");
        }
        Ok(removed)
    }

    /// Drop every expired session row.
    pub async fn purge_expired(&self) -> Result<u64, AuthError> {
        Ok(self.service.delete_expired_sessions(Utc::now()).await?)
    }

    fn check_password(&self, password: &str) -> Result<(), AuthError> {
        if password.chars().count() < self.config.min_password_length {
            return Err(AuthError::WeakPassword {
                min: self.config.min_password_length,
            });
        }
        Ok(())
    }
}
