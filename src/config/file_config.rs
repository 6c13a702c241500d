//! Configuration file discovery and creation.
//!
//! # Configuration File Format
//!
//! ```toml
//! [site]
//! base_url = "https://pastpapers.wiki"
//! user_agent = "Mozilla/5.0 ..."
//! timeout_secs = 15
//!
//! [downloads]
//! default_path = "./downloads"
//! ```

use std::path::{Path, PathBuf};

use super::Config;

const LOCAL_CONFIG_FILE: &str = "pastpapers.toml";

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// Look for a config file in the working directory, then in the user config
/// directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("pastpapers").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Write the default configuration to `path`, refusing to overwrite
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(&Config::default())?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_load_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path).unwrap();
        let loaded = load_config(Some(&path)).unwrap();

        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_write_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            write_default_config(&path),
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
