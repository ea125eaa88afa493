use anyhow::{Context, Result};
use clickup::{ClientSettings, DEFAULT_BASE_URL, TEAM_ENV, TOKEN_ENV};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "clicktick";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickTickConfig {
    /// Base URL of the ClickUp API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Workspace ("team") id. `CLICKUP_TEAM_ID` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,

    /// Personal API token. `CLICKUP_TOKEN` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Seconds between background refreshes in the terminal UI
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// How many days back to look for a task to resume
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_refresh_interval_secs() -> u64 {
    180
}

fn default_lookback_days() -> u32 {
    30
}

impl Default for ClickTickConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            team_id: None,
            token: None,
            refresh_interval_secs: default_refresh_interval_secs(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl ClickTickConfig {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("logs"))
    }

    /// Load config from disk and apply environment overrides. A missing
    /// file yields the defaults.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_overrides(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(TEAM_ENV).ok(),
        ))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Non-blank values replace what the file said.
    pub fn with_overrides(mut self, token: Option<String>, team_id: Option<String>) -> Self {
        if let Some(token) = non_blank(token) {
            self.token = Some(token);
        }
        if let Some(team_id) = non_blank(team_id) {
            self.team_id = Some(team_id);
        }
        self
    }

    /// Write a default config to `path` unless something is already there.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(true)
    }

    pub fn client_settings(&self) -> ClientSettings {
        let mut settings = ClientSettings::new(self.api_url.clone());
        settings.token = self.token.clone();
        settings.team_id = self.team_id.clone();
        settings
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
