//! Configuration handling for the command line front end

use crate::state::Session;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding where records are stored
pub const DATA_DIR_ENV: &str = "FIELDSURVEY_DATA_DIR";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SurveyConfig {
    /// Directory holding the record store
    pub data_dir: Option<PathBuf>,
    /// Logged-in user, if any
    pub session: Option<Session>,
}

impl SurveyConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "fieldsurvey", "fieldsurvey")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<()> {
        let path =
            Self::config_path().ok_or_else(|| anyhow!("No config directory on this platform"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Where the record store lives
    ///
    /// The environment override wins, then the configured directory, then
    /// the platform data directory.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        self.resolve_data_dir_with(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    fn resolve_data_dir_with(&self, env_override: Option<PathBuf>) -> Result<PathBuf> {
        env_override
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| self.data_dir.clone())
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .ok_or_else(|| anyhow!("No data directory; set {DATA_DIR_ENV}"))
    }
}
