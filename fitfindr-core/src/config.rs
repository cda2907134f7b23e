use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::render::ViewMode;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Environment variable that overrides the configured base URL.
pub const API_URL_ENV: &str = "FITFINDR_API_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_url = "http://localhost:8001"
/// default_view = "chart"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Base URL of the recommendation backend.
    pub api_url: Option<String>,

    /// View shown first after a search.
    #[serde(default)]
    pub default_view: Option<ViewMode>,

    /// Value of `FITFINDR_API_URL` captured at load time; never written back.
    #[serde(skip)]
    env_api_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.env_api_url = std::env::var(API_URL_ENV).ok();
        Ok(cfg)
    }

    /// Load config from an explicit path, ignoring the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "fitfindr", "fitfindr")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the environment override, e.g. with a command-line flag.
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.env_api_url = Some(url);
        }
        self
    }

    pub fn set_api_url(&mut self, url: impl Into<String>) {
        self.api_url = Some(url.into());
    }

    /// Effective base URL: override, then config file, then the default.
    pub fn api_base_url(&self) -> String {
        [self.env_api_url.as_deref(), self.api_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn default_view(&self) -> ViewMode {
        self.default_view.unwrap_or_default()
    }
}
