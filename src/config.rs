//! Client configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Backend the original development setup serves on.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Where the resolver backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL all endpoint paths are resolved against.
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Where downloads are saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Destination directory for navigated downloads.
    pub dir: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend: BackendConfig,
    pub download: DownloadConfig,
}

impl ClientConfig {
    /// Default location of the config file.
    #[must_use]
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("grabdeck")
            .join("config.toml")
    }

    /// Loads the configuration, writing a template on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the template cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            return Ok(toml::from_str(&contents)?);
        }

        let config = Self::default();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let template = format!(
            "# grabdeck configuration\n\n{}",
            toml::to_string(&config).map_err(|e| std::io::Error::other(e.to_string()))?
        );
        std::fs::write(path, template)?;
        log::info!("wrote config template to {}", path.display());
        Ok(config)
    }

    /// The backend base URL, parsed.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URL.
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.backend.base_url)?)
    }
}
