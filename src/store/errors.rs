//! Store error types
//!
//! Error codes:
//! - MENU_STORE_UNAVAILABLE: connection could not be established
//! - MENU_STORE_QUERY_FAILED: a statement failed against a live connection
//! - MENU_STORE_MALFORMED_ROW: a stored value could not be read back
//! - MENU_STORE_INVALID_TABLE: a table name is not a plain identifier
//! - MENU_STORE_TRANSACTION: begin/commit/rollback misuse or failure
//!
//! None of these are retried inside the crate.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Cannot reach data store: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed row in {table}: {reason}")]
    MalformedRow { table: String, reason: String },

    #[error("Invalid table name '{0}'")]
    InvalidTable(String),

    #[error("Transaction error: {0}")]
    Transaction(String),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "MENU_STORE_UNAVAILABLE",
            StoreError::Query(_) => "MENU_STORE_QUERY_FAILED",
            StoreError::MalformedRow { .. } => "MENU_STORE_MALFORMED_ROW",
            StoreError::InvalidTable(_) => "MENU_STORE_INVALID_TABLE",
            StoreError::Transaction(_) => "MENU_STORE_TRANSACTION",
        }
    }

    /// True for failures to reach the store at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Query(e.to_string())
    }
}
