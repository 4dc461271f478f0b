//! Repository error types
//!
//! Error codes:
//! - MENU_STORE_UNAVAILABLE: no connection could be opened
//! - MENU_STORE_*: the store failed while running a plan
//! - MENU_INVALID_MEALTIME_CODE / MENU_INVALID_LOCATION_CODE: a stored row
//!   carries a code outside 1-3; the whole load fails
//! - MENU_PARTITION_*: partitions could not be listed

use thiserror::Error;

use crate::partition::PartitionError;
use crate::schema::SchemaError;
use crate::store::StoreError;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Cannot reach data store: {0}")]
    StoreUnavailable(String),

    #[error(transparent)]
    Store(StoreError),

    #[error("Unrecognized mealtime code {code} for recipe '{recipe}'")]
    InvalidMealtimeCode { code: i64, recipe: String },

    #[error("Unrecognized location code {code} for recipe '{recipe}'")]
    InvalidLocationCode { code: i64, recipe: String },

    #[error(transparent)]
    Partition(PartitionError),
}

impl RepositoryError {
    pub fn code(&self) -> &'static str {
        match self {
            RepositoryError::StoreUnavailable(_) => "MENU_STORE_UNAVAILABLE",
            RepositoryError::Store(e) => e.code(),
            RepositoryError::InvalidMealtimeCode { .. } => "MENU_INVALID_MEALTIME_CODE",
            RepositoryError::InvalidLocationCode { .. } => "MENU_INVALID_LOCATION_CODE",
            RepositoryError::Partition(e) => e.code(),
        }
    }

    /// Attaches the offending row's recipe to a decoding failure
    pub fn from_schema(err: SchemaError, recipe: &str) -> Self {
        match err {
            SchemaError::InvalidMealtimeCode(code) => RepositoryError::InvalidMealtimeCode {
                code,
                recipe: recipe.to_string(),
            },
            SchemaError::InvalidLocationCode(code) => RepositoryError::InvalidLocationCode {
                code,
                recipe: recipe.to_string(),
            },
        }
    }
}

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(reason) => RepositoryError::StoreUnavailable(reason),
            other => RepositoryError::Store(other),
        }
    }
}

impl From<PartitionError> for RepositoryError {
    fn from(e: PartitionError) -> Self {
        RepositoryError::Partition(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_maps_to_its_own_variant() {
        let err = RepositoryError::from(StoreError::Unavailable("refused".into()));
        assert_eq!(err.code(), "MENU_STORE_UNAVAILABLE");
        assert_eq!(err.to_string(), "Cannot reach data store: refused");

        let err = RepositoryError::from(StoreError::Query("syntax".into()));
        assert_eq!(err.code(), "MENU_STORE_QUERY_FAILED");
    }

    #[test]
    fn test_schema_errors_name_the_recipe() {
        let err = RepositoryError::from_schema(SchemaError::InvalidLocationCode(9), "Pizza");
        assert_eq!(err.code(), "MENU_INVALID_LOCATION_CODE");
        assert!(err.to_string().contains("9"));
        assert!(err.to_string().contains("Pizza"));
    }
}
