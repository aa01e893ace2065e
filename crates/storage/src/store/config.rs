#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const ENV_STORAGE_DIR: &str = "SP_STORAGE_DIR";
pub const ENV_DB_FILE: &str = "SP_DB_FILE";
pub const ENV_BUSY_TIMEOUT_MS: &str = "SP_BUSY_TIMEOUT_MS";
pub const ENV_CHILD_FETCH: &str = "SP_CHILD_FETCH";

pub const DEFAULT_STORAGE_DIR: &str = ".strategy_planner";
pub const DEFAULT_DB_FILE: &str = "strategy_planner.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// How the hierarchy assembler loads one level of children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChildFetch {
    /// One query per parent row.
    #[default]
    PerParent,
    /// One `IN (…)` query per level, grouped by parent in memory.
    Batched,
}

impl ChildFetch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerParent => "per_parent",
            Self::Batched => "batched",
        }
    }
}

impl FromStr for ChildFetch {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "per_parent" | "per-parent" => Ok(Self::PerParent),
            "batched" => Ok(Self::Batched),
            _ => Err(ConfigError::InvalidChildFetch(value.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be an integer number of milliseconds (got {value:?})")]
    InvalidNumber { name: &'static str, value: String },
    #[error("child fetch must be one of per_parent, batched (got {0:?})")]
    InvalidChildFetch(String),
    #[error("db file name must not be empty or contain path separators")]
    InvalidDbFile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_dir: PathBuf,
    pub db_file: String,
    pub busy_timeout: Duration,
    pub child_fetch: ChildFetch,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_DIR)
    }
}

impl StoreConfig {
    pub fn new(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: storage_dir.as_ref().to_path_buf(),
            db_file: DEFAULT_DB_FILE.to_string(),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            child_fetch: ChildFetch::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let storage_dir =
            var(ENV_STORAGE_DIR).unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string());
        let mut config = Self::new(storage_dir);
        if let Some(db_file) = var(ENV_DB_FILE) {
            config = config.with_db_file(db_file)?;
        }
        if let Some(raw) = var(ENV_BUSY_TIMEOUT_MS) {
            let ms = raw.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                name: ENV_BUSY_TIMEOUT_MS,
                value: raw.clone(),
            })?;
            config.busy_timeout = Duration::from_millis(ms);
        }
        if let Some(raw) = var(ENV_CHILD_FETCH) {
            config.child_fetch = raw.parse()?;
        }
        Ok(config)
    }

    pub fn with_db_file(mut self, db_file: impl Into<String>) -> Result<Self, ConfigError> {
        let db_file = db_file.into();
        if db_file.trim().is_empty() || db_file.contains(['/', '\\']) {
            return Err(ConfigError::InvalidDbFile);
        }
        self.db_file = db_file;
        Ok(self)
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(&self.db_file)
    }
}
