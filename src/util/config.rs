//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.coresmith/config.toml` - User-wide defaults
//! - Project: `.coresmith/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [main]
//! cores_root = ["~/ip/cores", "vendor/cores"]
//! tool = "icarus"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".coresmith";

/// Name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub main: MainConfig,
}

/// The `[main]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainConfig {
    /// Directories to search for cores, in scan order.
    pub cores_root: Vec<PathBuf>,

    /// Active tool, selecting tool-specific dependencies.
    pub tool: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Relative `cores_root` entries are taken relative to the directory
    /// that holds the `.coresmith` folder (or the file's own directory).
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let base = config_base(path);
        for root in &mut config.main.cores_root {
            if root.is_relative() && !root.starts_with("~") {
                *root = base.join(&*root);
            }
        }

        Ok(config)
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.main.cores_root.is_empty() {
            self.main.cores_root = other.main.cores_root;
        }
        if other.main.tool.is_some() {
            self.main.tool = other.main.tool;
        }
    }
}

fn config_base(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    match parent.file_name() {
        Some(name) if name == CONFIG_DIR => parent
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| parent.to_path_buf()),
        _ => parent.to_path_buf(),
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.coresmith/config.toml)
/// 2. Global config (~/.coresmith/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.coresmith).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.coresmith/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Get the project config path (.coresmith/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}
