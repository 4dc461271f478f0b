//! Configuration error types
//!
//! Error codes:
//! - MENU_CONFIG_READ: the file could not be read
//! - MENU_CONFIG_PARSE: the file is not valid config JSON
//! - MENU_CONFIG_INVALID: a value is out of range

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read(_) => "MENU_CONFIG_READ",
            ConfigError::Parse(_) => "MENU_CONFIG_PARSE",
            ConfigError::Invalid { .. } => "MENU_CONFIG_INVALID",
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
