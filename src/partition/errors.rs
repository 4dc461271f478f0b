//! Partition error types
//!
//! Error codes:
//! - MENU_PARTITION_INVALID_PREFIX
//! - MENU_PARTITION_PATTERN
//! - MENU_PARTITION_CATALOG

use thiserror::Error;

/// Result type for partition operations
pub type PartitionResult<T> = Result<T, PartitionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// Prefix is not a plain SQL identifier
    #[error("Invalid table prefix '{0}'")]
    InvalidPrefix(String),

    /// Internal name pattern failed to compile
    #[error("Partition name pattern error: {0}")]
    Pattern(String),

    /// Store metadata could not be listed
    #[error("Partition catalog unavailable: {0}")]
    Catalog(String),
}

impl PartitionError {
    pub fn code(&self) -> &'static str {
        match self {
            PartitionError::InvalidPrefix(_) => "MENU_PARTITION_INVALID_PREFIX",
            PartitionError::Pattern(_) => "MENU_PARTITION_PATTERN",
            PartitionError::Catalog(_) => "MENU_PARTITION_CATALOG",
        }
    }
}
