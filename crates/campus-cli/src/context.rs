use std::sync::Arc;

use anyhow::Context;
use campus_auth::{AuthService, token_store};
use campus_config::CampusConfig;
use campus_core::identity::AuthIdentity;
use campus_core::page::Page;
use campus_db::CampusService;

use crate::cli::GlobalFlags;

/// Shared handles for CLI commands.
pub struct AppContext {
    pub service: Arc<CampusService>,
    pub auth: AuthService,
    pub config: CampusConfig,
}

impl AppContext {
    pub async fn init(config: CampusConfig) -> anyhow::Result<Self> {
        let capacity = config.server.change_feed_capacity;
        let service = if config.database.is_remote() {
            CampusService::new_remote(&config.database.url, &config.database.auth_token, capacity)
                .await
                .context("failed to open remote database")?
        } else {
            CampusService::new_local(&config.database.path, capacity)
                .await
                .with_context(|| format!("failed to open database at {}", config.database.path))?
        };
        let service = Arc::new(service);
        let auth = AuthService::new(Arc::clone(&service), config.auth.clone());
        Ok(Self {
            service,
            auth,
            config,
        })
    }

    /// The stored session token: `auth.token` from config first, then the token store.
    pub fn session_token(&self) -> Option<String> {
        let configured = self.config.auth.token.trim();
        if configured.is_empty() {
            token_store::load()
        } else {
            Some(configured.to_string())
        }
    }

    /// Resolve the signed-in user, failing when no live session exists.
    pub async fn require_user(&self) -> anyhow::Result<AuthIdentity> {
        let token = self
            .session_token()
            .ok_or(campus_auth::AuthError::NotAuthenticated)?;
        Ok(self.auth.require_user(&token).await?)
    }

    /// Page for list commands: `--limit`, else `general.default_limit`.
    pub fn page(&self, flags: &GlobalFlags, offset: Option<u32>) -> Page {
        Page::from_query(flags.limit, offset, self.config.general.default_limit)
    }

    /// Page for chat history: `--limit`, else `general.message_limit`.
    pub fn message_page(&self, flags: &GlobalFlags, offset: Option<u32>) -> Page {
        Page::from_query(flags.limit, offset, self.config.general.message_limit)
    }
}
