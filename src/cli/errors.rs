//! CLI error type
//!
//! Carries the stable code of whatever failed underneath, so the error
//! envelope always names a `MENU_*` code.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::ingest::IngestError;
use crate::repository::RepositoryError;
use crate::store::StoreError;

#[derive(Debug)]
pub struct CliError {
    code: &'static str,
    message: String,
}

impl CliError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new("MENU_CLI_IO_ERROR", msg)
    }

    pub fn already_initialized(path: &std::path::Path) -> Self {
        Self::new(
            "MENU_CLI_ALREADY_INITIALIZED",
            format!("Database {} already exists", path.display()),
        )
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

impl From<RepositoryError> for CliError {
    fn from(e: RepositoryError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

impl From<IngestError> for CliError {
    fn from(e: IngestError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_pass_through() {
        let err = CliError::from(RepositoryError::StoreUnavailable("refused".into()));
        assert_eq!(err.code(), "MENU_STORE_UNAVAILABLE");
        assert_eq!(err.to_string(), "MENU_STORE_UNAVAILABLE: Cannot reach data store: refused");
    }
}
