//! Configuration loading
//!
//! Handles parsing of the optional `.tasktrack.toml` file in the working
//! directory. A missing file means defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::storage::DOCUMENT_FILE;

/// Name of the configuration file
pub const CONFIG_FILE: &str = ".tasktrack.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path of the project document
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// Git integration
    #[serde(default)]
    pub git: GitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            git: GitConfig::default(),
        }
    }
}

fn default_file() -> PathBuf {
    PathBuf::from(DOCUMENT_FILE)
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitConfig {
    /// Create and check out a branch when a task is started
    #[serde(default = "default_true")]
    pub create_branch: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            create_branch: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.tasktrack.toml` from `dir`, or return defaults when absent.
    ///
    /// Unlike a missing file, a malformed one is an error.
    pub fn load_from_dir(dir: &Path) -> crate::error::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.is_file() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.file.as_os_str().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "file cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
