//! TOML configuration for the monitor process.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_READ_POOL_SIZE, DEFAULT_STALE_RUN_TIMEOUT_SECS};
use crate::errors::ConfigError;

/// Process-level configuration. Every field is optional; accessors supply
/// the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VigilConfig {
    /// Path of the SQLite database. None means the caller decides.
    pub database_path: Option<PathBuf>,
    /// Number of read connections in the pool.
    pub read_pool_size: Option<usize>,
    /// Seconds after which a `running` analysis run counts as stale.
    pub stale_run_timeout_secs: Option<u64>,
}

impl VigilConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(DEFAULT_READ_POOL_SIZE)
    }

    pub fn effective_stale_run_timeout_secs(&self) -> u64 {
        self.stale_run_timeout_secs
            .unwrap_or(DEFAULT_STALE_RUN_TIMEOUT_SECS)
    }
}
