use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use newcomer_core::models::UserPreferences;
use newcomer_core::CoreConfig;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "newcomer-assistant";
const CONFIG_FILE_NAME: &str = "config.json";

/// CLI configuration that can be loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Backend base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Preferences every session starts from
    #[serde(default)]
    pub preferences: UserPreferences,
}

impl CliConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// `<config dir>/newcomer-assistant/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// An explicit path must exist; the default location is optional.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Core settings: file values, then `NEWCOMER_API_URL`
    pub fn core_config(&self) -> CoreConfig {
        let mut config = match &self.api_base_url {
            Some(url) => CoreConfig::new(url.as_str()),
            None => CoreConfig::default(),
        };
        if let Some(secs) = self.request_timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config.with_env_overrides()
    }
}
