//! Integration tests for TOML and environment layering.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use campus_config::{CampusConfig, StorageBackend};
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "campus.toml",
            r#"
[database]
path = "data/campus.db"

[storage]
backend = "memory"
public_base_url = "https://campus.example.edu/storage/"
max_upload_bytes = 2048

[auth]
session_ttl_hours = 12
min_password_length = 10

[server]
host = "0.0.0.0"
port = 9000

[general]
default_limit = 25
"#,
        )?;

        let config = CampusConfig::figment().extract::<CampusConfig>()?;
        assert_eq!(config.database.path, "data/campus.db");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.base_url(), "https://campus.example.edu/storage");
        assert_eq!(config.storage.max_upload_bytes, 2048);
        assert_eq!(config.auth.session_ttl_hours, 12);
        assert_eq!(config.auth.min_password_length, 10);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.general.default_limit, 25);
        assert_eq!(config.general.message_limit, 50);
        Ok(())
    });
}

#[test]
fn env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("campus.toml", "[server]\nport = 9000\n")?;
        jail.set_env("CAMPUS_SERVER__PORT", "9100");
        jail.set_env("CAMPUS_AUTH__TOKEN", "tok-from-env");

        let config = CampusConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.auth.token, "tok-from-env");
        Ok(())
    });
}

#[test]
fn explicit_path_replaces_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file("campus.toml", "[server]\nport = 9000\n")?;
        jail.create_file("other.toml", "[server]\nport = 7000\n")?;

        let config =
            CampusConfig::load_from(Some(std::path::Path::new("other.toml"))).expect("loads");
        assert_eq!(config.server.port, 7000);
        Ok(())
    });
}

#[test]
fn missing_files_fall_back_to_defaults() {
    Jail::expect_with(|_jail| {
        let config = CampusConfig::load().expect("defaults load");
        assert_eq!(config.database.path, "campus.db");
        assert_eq!(config.general.default_limit, 10);
        Ok(())
    });
}

#[test]
fn invalid_values_are_reported() {
    Jail::expect_with(|jail| {
        jail.set_env("CAMPUS_SERVER__CHANGE_FEED_CAPACITY", "0");
        let err = CampusConfig::load().unwrap_err();
        assert!(err.to_string().contains("change_feed_capacity"));
        Ok(())
    });
}
