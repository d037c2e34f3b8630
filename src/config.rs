//! Configuration System
//!
//! Layered configuration for the catalog: where it lives, which host it
//! records, how the update pipeline is sized and how logging is set up.
//! Values are merged from defaults, config files and environment variables by
//! [`ConfigLoader`]; command-line flags are applied on top by the CLI.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::ENV_PREFIX;
pub use sources::catalog_file::CATALOG_CONFIG_FILE;
pub use sources::global_file::global_config_path;

/// File name of the catalog database inside the catalog directory
pub const CATALOG_DB_NAME: &str = "files.db";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding the catalog database and its config.toml
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,

    /// Hostname recorded in every row (defaults to the local host name)
    #[serde(default)]
    pub hostname: Option<String>,

    /// Update pipeline settings
    #[serde(default)]
    pub update: UpdateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Update pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Default root to walk
    #[serde(default = "default_update_path")]
    pub path: PathBuf,

    /// Hasher worker count (defaults to available parallelism)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Capacity of the walker → hasher queue
    #[serde(default = "default_capacity")]
    pub queue_capacity: usize,

    /// Capacity of the hasher → reconciler conduit
    #[serde(default = "default_capacity")]
    pub conduit_capacity: usize,

    #[serde(default)]
    pub follow_symlinks: bool,

    /// File names skipped during the walk, together with their subtrees
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

/// `~/.filecat`, or `.filecat` when no home directory is known
pub fn default_catalog_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".filecat"))
        .unwrap_or_else(|| PathBuf::from(".filecat"))
}

fn default_update_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_capacity() -> usize {
    1024
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            path: default_update_path(),
            workers: None,
            queue_capacity: default_capacity(),
            conduit_capacity: default_capacity(),
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_dir: default_catalog_dir(),
            hostname: None,
            update: UpdateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl UpdateConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == Some(0) {
            return Err("update.workers must be at least 1".to_string());
        }
        if self.queue_capacity == 0 {
            return Err("update.queue_capacity must be at least 1".to_string());
        }
        if self.conduit_capacity == 0 {
            return Err("update.conduit_capacity must be at least 1".to_string());
        }
        Ok(())
    }
}

impl CatalogConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.catalog_dir.as_os_str().is_empty() {
            errors.push("catalog_dir cannot be empty".to_string());
        }
        if matches!(self.hostname.as_deref(), Some(h) if h.trim().is_empty()) {
            errors.push("hostname cannot be blank".to_string());
        }
        if let Err(e) = self.update.validate() {
            errors.push(e);
        }
        if let Err(e) = self.logging.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Path of the catalog database
    pub fn catalog_db_path(&self) -> PathBuf {
        self.catalog_dir.join(CATALOG_DB_NAME)
    }

    /// Hostname for new rows: explicit override, then config, then the
    /// local host name.
    pub fn resolve_hostname(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| self.hostname.clone())
            .or_else(sysinfo::System::host_name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "localhost".to_string())
    }
}
