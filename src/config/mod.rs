//! Configuration management.

mod file_config;

pub use file_config::{find_config_file, write_default_config, ConfigError};

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Target site settings
    #[serde(default)]
    pub site: SiteConfig,

    /// Download settings
    #[serde(default)]
    pub downloads: DownloadConfig,
}

/// Settings for the scraped site and the transport used to reach it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Origin that relative links and listing paths resolve against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Connect and read timeout for every request, and the deadline for page fetches
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://pastpapers.wiki".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Download configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory downloads are written to; relative paths are anchored to the
    /// working directory
    #[serde(default = "default_download_dir")]
    pub default_path: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            default_path: default_download_dir(),
        }
    }
}

impl DownloadConfig {
    /// The download directory as an absolute path, without `.` components
    pub fn resolved_path(&self) -> std::io::Result<PathBuf> {
        let path = if self.default_path.is_absolute() {
            self.default_path.clone()
        } else {
            std::env::current_dir()?.join(&self.default_path)
        };

        Ok(path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect())
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

/// Load configuration from defaults, an optional file, then
/// `PASTPAPERS__SECTION__KEY` environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(config::Environment::with_prefix("PASTPAPERS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
