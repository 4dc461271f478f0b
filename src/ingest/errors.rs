//! Ingestion error types
//!
//! Error codes:
//! - MENU_INGEST_PARSE: an input line is not a valid menu day
//! - MENU_INGEST_READ: the input could not be read
//! - MENU_STORE_*: the store rejected a write; the batch was rolled back

use thiserror::Error;

use crate::store::StoreError;

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Invalid menu day on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Cannot read menu input: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IngestError {
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::Parse { .. } => "MENU_INGEST_PARSE",
            IngestError::Read(_) => "MENU_INGEST_READ",
            IngestError::Store(e) => e.code(),
        }
    }
}
