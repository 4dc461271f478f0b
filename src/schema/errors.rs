//! Schema error types
//!
//! Error codes:
//! - MENU_INVALID_MEALTIME_CODE
//! - MENU_INVALID_LOCATION_CODE
//!
//! A stored code outside 1-3 means the row cannot be labelled. These are
//! never recovered from by guessing a label.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Unrecognized mealtime code {0}")]
    InvalidMealtimeCode(i64),

    #[error("Unrecognized location code {0}")]
    InvalidLocationCode(i64),
}

impl SchemaError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::InvalidMealtimeCode(_) => "MENU_INVALID_MEALTIME_CODE",
            SchemaError::InvalidLocationCode(_) => "MENU_INVALID_LOCATION_CODE",
        }
    }
}
