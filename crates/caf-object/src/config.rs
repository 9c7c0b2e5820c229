//! Hashing configuration.
//!
//! Values are layered: built-in defaults, then a TOML file, then the
//! `CAF_HASH_ALGORITHM` environment variable. Command-line flags are applied
//! last by the caller.

use std::path::{Path, PathBuf};

use caf_hash::{HashAlgorithm, HashError};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured algorithm.
pub const ALGORITHM_ENV: &str = "CAF_HASH_ALGORITHM";

/// Name of the repository directory; never part of a snapshot.
pub const DEFAULT_REPO_DIR: &str = ".caf";

/// Errors produced while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid algorithm override: {0}")]
    Algorithm(#[from] HashError),
}

/// Settings shared by everything that derives identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashConfig {
    /// Digest algorithm for every identifier in a store.
    pub algorithm: HashAlgorithm,
    /// Entry names skipped at every level of a directory snapshot.
    pub ignore: Vec<String>,
    /// Hash sibling entries of a directory snapshot on the rayon pool.
    pub parallel: bool,
    /// Record files with an executable bit as `EntryKind::Executable`.
    pub detect_executable: bool,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            ignore: vec![DEFAULT_REPO_DIR.to_string()],
            parallel: true,
            detect_executable: false,
        }
    }
}

impl HashConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply `CAF_HASH_ALGORITHM` if it is set and non-empty.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let value = std::env::var(ALGORITHM_ENV).ok();
        self.with_algorithm_override(value.as_deref())
    }

    /// Replace the algorithm with `value` when one is given.
    pub fn with_algorithm_override(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(name) = value.filter(|v| !v.is_empty()) {
            self.algorithm = name.parse()?;
        }
        Ok(self)
    }

    /// Whether a directory entry called `name` is left out of snapshots.
    pub fn is_ignored(&self, name: &[u8]) -> bool {
        self.ignore.iter().any(|i| i.as_bytes() == name)
    }
}
