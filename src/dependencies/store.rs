use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::configuration::Configuration;

/// Environment variable overriding the location of the configuration file.
pub const CONFIG_PATH_ENV: &str = "COMMUTER_CONFIG";

const CONFIG_FILE_NAME: &str = "commuter.conf";

// Dependency to load and save the configuration record
#[async_trait]
pub trait ConfigurationStore {
    async fn load(&self) -> Result<Configuration>;
    async fn save(&self, configuration: &Configuration) -> Result<()>;
}

/// Configuration store backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for the configuration file of the current user.
    ///
    /// Uses `COMMUTER_CONFIG` when set, otherwise `<config dir>/commuter/commuter.conf`.
    /// Falls back to `commuter.conf` in the working directory when there's no config dir.
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join("commuter").join(CONFIG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigurationStore for FileStore {
    async fn load(&self) -> Result<Configuration> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read file: {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse configuration: {}", self.path.display()))
    }

    async fn save(&self, configuration: &Configuration) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(configuration).context("serializing configuration")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }

        debug!(path = %self.path.display(), "saving configuration");
        tokio::fs::write(&self.path, contents)
            .await
            .with_context(|| format!("failed to write file: {}", self.path.display()))
    }
}
