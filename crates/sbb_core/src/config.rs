//! Runtime configuration for board entry points.
//!
//! # Responsibility
//! - Resolve database location and logging settings from explicit values or
//!   the process environment.
//! - Open the configured store through `db::open_*`.
//!
//! # Invariants
//! - Unset `db_path` means an in-memory store.
//! - Unset `log_level` falls back to `default_log_level()`.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, LoggingError};
use rusqlite::Connection;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "SBB_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "SBB_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SBB_LOG_DIR";

/// Resolved configuration for one process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardConfig {
    /// SQLite file path; `None` opens an in-memory database.
    pub db_path: Option<PathBuf>,
    /// Log level override.
    pub log_level: Option<String>,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl BoardConfig {
    /// Reads `SBB_DB_PATH`, `SBB_LOG_LEVEL` and `SBB_LOG_DIR`.
    ///
    /// Blank values are treated as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            log_level: read(ENV_LOG_LEVEL),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Starts file logging when `log_dir` is configured.
    ///
    /// Returns `Ok(false)` when logging stays disabled.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        let Some(log_dir) = self.log_dir.as_deref() else {
            return Ok(false);
        };
        init_logging(self.effective_log_level(), log_dir)?;
        Ok(true)
    }

    /// Opens the configured database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match self.db_path.as_deref() {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}
