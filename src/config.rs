//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "placement-prep";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "placement-prep.db";

/// Settings read from `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database holding all persisted state
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// JDs shorter than this many characters get a warning
    #[serde(default = "default_short_jd_threshold")]
    pub short_jd_threshold: usize,

    /// Number of entries shown by `history` without `--all`
    #[serde(default = "default_history_preview_len")]
    pub history_preview_len: usize,
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
        .join(DATABASE_FILE)
}

fn default_short_jd_threshold() -> usize {
    crate::analysis::DEFAULT_SHORT_JD_THRESHOLD
}

fn default_history_preview_len() -> usize {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            short_jd_threshold: default_short_jd_threshold(),
            history_preview_len: default_history_preview_len(),
        }
    }
}

impl AppConfig {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
            .join(CONFIG_FILE)
    }

    /// Load configuration from `path` or return defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: AppConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            tracing::debug!("Loaded config from {:?}", path);
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }
}
