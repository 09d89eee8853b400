//! Shared application state and WebSocket event types.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use campus_auth::AuthService;
use campus_config::CampusConfig;
use campus_core::page::Page;
use campus_core::realtime::ChangeEvent;
use campus_db::CampusService;
use campus_storage::ObjectStorage;

use crate::error::ServerError;
use crate::utils::PageQuery;

/// Frames sent to realtime WebSocket clients.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsEvent {
    /// The socket is live and filtering on this table.
    Subscribed { table: String },
    /// One committed row change.
    Change(ChangeEvent),
    /// The client fell behind; it should refetch.
    EventsMissed { count: u64 },
}

pub struct AppState {
    pub service: Arc<CampusService>,
    pub auth: AuthService,
    pub storage: ObjectStorage,
    pub config: CampusConfig,
    pub ws_connection_count: Arc<AtomicUsize>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(service: Arc<CampusService>, storage: ObjectStorage, config: CampusConfig) -> Self {
        let auth = AuthService::new(Arc::clone(&service), config.auth.clone());
        Self {
            service,
            auth,
            storage,
            config,
            ws_connection_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Open the database and object store named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if either backend cannot be opened.
    pub async fn from_config(config: CampusConfig) -> Result<Self, ServerError> {
        let capacity = config.server.change_feed_capacity;
        let service = if config.database.is_remote() {
            tracing::info!(url = %config.database.url, "opening remote database");
            CampusService::new_remote(&config.database.url, &config.database.auth_token, capacity)
                .await?
        } else {
            tracing::info!(path = %config.database.path, "opening local database");
            CampusService::new_local(&config.database.path, capacity).await?
        };
        let storage = ObjectStorage::from_config(&config.storage)?;
        Ok(Self::new(Arc::new(service), storage, config))
    }

    /// Page for a list endpoint, defaulting to `general.default_limit`.
    pub fn page(&self, query: &PageQuery) -> Page {
        query.page(self.config.general.default_limit)
    }

    /// Page for chat history, defaulting to `general.message_limit`.
    pub fn message_page(&self, query: &PageQuery) -> Page {
        query.page(self.config.general.message_limit)
    }
}
