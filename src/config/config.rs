//! Configuration file
//!
//! `menudb.json`:
//!
//! ```json
//! {
//!   "database_path": "./menu.db",
//!   "table_prefix": "menu",
//!   "epoch": { "year": 2024, "month": 7 },
//!   "short_limit_days": 3,
//!   "connect_timeout_secs": 30,
//!   "log_level": "info"
//! }
//! ```
//!
//! Only `database_path` is required. `MENUDB_DATABASE_PATH` and
//! `MENUDB_TABLE_PREFIX` override the file when set. Everything is resolved
//! once at load time; nothing downstream reads the environment.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigResult};
use crate::observability::Severity;
use crate::partition::{PartitionKey, TableLocator};
use crate::planner::{PlannerConfig, DEFAULT_SHORT_LIMIT_DAYS};
use crate::store::SqliteConnectionFactory;

pub const ENV_DATABASE_PATH: &str = "MENUDB_DATABASE_PATH";
pub const ENV_TABLE_PREFIX: &str = "MENUDB_TABLE_PREFIX";

/// First month with guaranteed data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochConfig {
    pub year: i32,
    pub month: u32,
}

impl Default for EpochConfig {
    fn default() -> Self {
        Self {
            year: 2024,
            month: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (required)
    pub database_path: String,

    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,

    #[serde(default)]
    pub epoch: EpochConfig,

    /// Days in the short window, today included
    #[serde(default = "default_short_limit_days")]
    pub short_limit_days: u32,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_table_prefix() -> String {
    "menu".to_string()
}
fn default_short_limit_days() -> u32 {
    DEFAULT_SHORT_LIMIT_DAYS
}
fn default_connect_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Reads, applies environment overrides, validates
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_json(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Applies overrides from `lookup`; empty values are ignored
    pub fn apply_overrides<L: Fn(&str) -> Option<String>>(&mut self, lookup: L) {
        if let Some(path) = lookup(ENV_DATABASE_PATH).filter(|v| !v.is_empty()) {
            self.database_path = path;
        }
        if let Some(prefix) = lookup(ENV_TABLE_PREFIX).filter(|v| !v.is_empty()) {
            self.table_prefix = prefix;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(ConfigError::invalid("database_path", "must not be empty"));
        }
        self.locator()?;
        self.epoch_key()?;
        if self.short_limit_days == 0 {
            return Err(ConfigError::invalid("short_limit_days", "must be >= 1"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::invalid("connect_timeout_secs", "must be > 0"));
        }
        self.log_severity()?;
        Ok(())
    }

    pub fn database_path(&self) -> &Path {
        Path::new(&self.database_path)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn epoch_key(&self) -> ConfigResult<PartitionKey> {
        PartitionKey::new(self.epoch.year, self.epoch.month).ok_or_else(|| {
            ConfigError::invalid(
                "epoch",
                format!("{}-{} is not a valid month", self.epoch.year, self.epoch.month),
            )
        })
    }

    pub fn locator(&self) -> ConfigResult<TableLocator> {
        TableLocator::new(self.table_prefix.as_str())
            .map_err(|e| ConfigError::invalid("table_prefix", e.to_string()))
    }

    pub fn planner_config(&self) -> ConfigResult<PlannerConfig> {
        Ok(PlannerConfig {
            epoch: self.epoch_key()?,
            short_limit_days: self.short_limit_days,
        })
    }

    pub fn log_severity(&self) -> ConfigResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            ConfigError::invalid("log_level", format!("unknown level '{}'", self.log_level))
        })
    }

    pub fn connection_factory(&self) -> SqliteConnectionFactory {
        SqliteConnectionFactory::new(self.database_path(), self.connect_timeout())
    }
}
