//! Store configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::LmdbError;

/// Configuration for an LMDB-backed account store.
///
/// Can be loaded from a TOML file via [`StoreConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Path of the store file.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Maximum size of the memory map in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Maximum number of concurrent read transactions.
    #[serde(default = "default_max_readers")]
    pub max_readers: u32,

    /// Number of accounts written by the seeding path.
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_path() -> PathBuf {
    PathBuf::from("accounts.db")
}

fn default_map_size() -> usize {
    10 * 1024 * 1024
}

fn default_max_readers() -> u32 {
    126
}

fn default_seed_count() -> usize {
    accountsvc_store::DEFAULT_SEED_COUNT
}

// ── Impl ───────────────────────────────────────────────────────────────

impl StoreConfig {
    /// Default configuration pointing at `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, LmdbError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LmdbError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LmdbError> {
        toml::from_str(s).map_err(|e| LmdbError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, LmdbError> {
        toml::to_string_pretty(self).map_err(|e| LmdbError::Config(e.to_string()))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            map_size: default_map_size(),
            max_readers: default_max_readers(),
            seed_count: default_seed_count(),
        }
    }
}
