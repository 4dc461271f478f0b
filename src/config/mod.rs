//! Startup configuration

mod config;
mod errors;

pub use config::{Config, EpochConfig, ENV_DATABASE_PATH, ENV_TABLE_PREFIX};
pub use errors::{ConfigError, ConfigResult};
