use std::path::{Path, PathBuf};

use anyhow::Context;
use campus_config::CampusConfig;

use crate::cli::GlobalFlags;

/// Load `.env` and the layered config, honoring `--config`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CampusConfig> {
    let config_path = flags.config.as_deref().map(PathBuf::from);
    if let Some(path) = &config_path {
        if !path.is_file() {
            anyhow::bail!("config file '{}' does not exist", path.display());
        }
    }

    load_dotenv(config_path.as_deref())?;
    CampusConfig::load_from(config_path.as_deref()).map_err(anyhow::Error::from)
}

/// Prefer a `.env` next to an explicit config file, then the working directory.
fn load_dotenv(config_path: Option<&Path>) -> anyhow::Result<()> {
    let sibling = config_path
        .and_then(Path::parent)
        .map(|dir| dir.join(".env"))
        .filter(|path| path.exists());

    if let Some(env_path) = sibling {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(config: Option<String>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: true,
            verbose: false,
            config,
        }
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(&flags(Some("/nonexistent/campus.toml".into())))
            .expect_err("missing file should fail");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("campus.toml");
        std::fs::write(&path, "[general]\ndefault_limit = 7\n").unwrap();

        let config = load_config(&flags(Some(path.display().to_string()))).unwrap();
        assert_eq!(config.general.default_limit, 7);
    }
}
