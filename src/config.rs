//! Shell configuration loaded from an optional TOML file.

use crate::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shell: ShellConfig,
    pub pager: PagerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt printed before every read
    pub prompt: String,
}

/// Programs spawned for `| less` and `| more`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    pub less: String,
    pub more: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "pxctl> ".to_string(),
        }
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            less: "less".to_string(),
            more: "more".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::DEFAULT_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the per-user config location when `path` is `None`.
    ///
    /// A missing file yields the defaults. A file that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            if path.is_some() {
                return Err(Error::Configuration {
                    reason: format!("config file not found: {}", config_path.display()),
                });
            }
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        debug!("Loading config from {}", config_path.display());
        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.pager.less.trim().is_empty() || config.pager.more.trim().is_empty() {
            return Err(Error::Configuration {
                reason: "pager programs must not be empty".to_string(),
            });
        }
        Ok(config)
    }

    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pxdiag").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
