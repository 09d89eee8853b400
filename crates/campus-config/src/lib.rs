//! # campus-config
//!
//! Layered configuration loading for Campus Hub using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CAMPUS_*` prefix, `__` as separator)
//! 2. Project-level `./campus.toml`, or the file passed with `--config`
//! 3. User-level `~/.config/campus/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CAMPUS_DATABASE__PATH` -> `database.path`,
//! `CAMPUS_SERVER__PORT` -> `server.port`, etc. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use campus_config::CampusConfig;
//!
//! let config = CampusConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod auth;
mod database;
mod error;
mod general;
mod server;
mod storage;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the project-local config.
pub const LOCAL_CONFIG_FILE: &str = "campus.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CampusConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CampusConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration with an explicit project file replacing `./campus.toml`.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(config_path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the default figment provider chain.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the figment provider chain, optionally with an explicit project file.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment_with(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project config
        let local_path =
            config_path.map_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE), Path::to_path_buf);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CAMPUS_").split("__"))
    }

    /// Reject values no component can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.change_feed_capacity == 0 {
            return Err(invalid("server.change_feed_capacity", "must be at least 1"));
        }
        if self.server.max_ws_connections == 0 {
            return Err(invalid("server.max_ws_connections", "must be at least 1"));
        }
        if self.auth.session_ttl_hours <= 0 {
            return Err(invalid("auth.session_ttl_hours", "must be positive"));
        }
        if self.storage.max_upload_bytes == 0 {
            return Err(invalid("storage.max_upload_bytes", "must be at least 1"));
        }
        if self.general.default_limit == 0 {
            return Err(invalid("general.default_limit", "must be at least 1"));
        }
        if self.storage.backend == StorageBackend::S3 && !self.storage.is_s3_configured() {
            return Err(ConfigError::NotConfigured {
                section: "storage (s3 backend)".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("campus").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CampusConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.database.is_remote());
        assert_eq!(config.storage.backend, StorageBackend::Local);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut config = CampusConfig::default();
        config.server.change_feed_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.change_feed_capacity"
        ));
    }

    #[test]
    fn s3_backend_requires_credentials() {
        let mut config = CampusConfig::default();
        config.storage.backend = StorageBackend::S3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
