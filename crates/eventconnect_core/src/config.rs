//! Process-level configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Describe where the database and logs live and the default radius.
//! - Build the single store instance a process shares.
//!
//! # Invariants
//! - Every field has a default; an empty environment yields an in-memory
//!   store and no file logging.

use crate::filter::DEFAULT_RADIUS_KM;
use crate::logging::{default_log_level, init_logging};
use crate::store::event_store::{EventStore, StoreResult};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "EVENTCONNECT_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "EVENTCONNECT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "EVENTCONNECT_LOG_DIR";
pub const ENV_RADIUS_KM: &str = "EVENTCONNECT_RADIUS_KM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidRadius(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRadius(value) => {
                write!(f, "{ENV_RADIUS_KM} must be a positive number, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite file; `None` keeps the catalog in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
    pub default_radius_km: f64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            default_radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from `EVENTCONNECT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = read(ENV_RADIUS_KM) {
            config.default_radius_km = match raw.trim().parse::<f64>() {
                Ok(radius) if radius.is_finite() && radius > 0.0 => radius,
                _ => return Err(ConfigError::InvalidRadius(raw)),
            };
        }

        Ok(config)
    }

    /// Starts file logging when `log_dir` is configured.
    ///
    /// Returns `Ok(false)` when no directory is configured.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(dir) = self.log_dir.as_ref() else {
            return Ok(false);
        };
        let dir = dir
            .to_str()
            .ok_or_else(|| format!("log_dir `{}` is not valid UTF-8", dir.display()))?;
        init_logging(&self.log_level, dir)?;
        Ok(true)
    }

    /// Opens the store described by this configuration.
    pub fn open_store(&self) -> StoreResult<EventStore> {
        match self.db_path.as_ref() {
            Some(path) => EventStore::open(path),
            None => EventStore::open_in_memory(),
        }
    }
}
