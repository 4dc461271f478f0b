//! Store boundary
//!
//! The read path needs plan execution plus table metadata; the ingestion
//! path additionally needs partition creation and transactional inserts.

use chrono::NaiveDate;

use super::errors::{StoreError, StoreResult};
use crate::partition::{is_identifier, PartitionCatalog};
use crate::planner::QueryPlan;
use crate::schema::{Location, MenuEntry, MenuRow};

/// Read side of a menu store
pub trait MenuStore: PartitionCatalog {
    /// Runs every partition query of `plan` as one UNION, ordered by
    /// recipe, date, mealtime. An empty plan returns no rows.
    fn fetch(&self, plan: &QueryPlan) -> StoreResult<Vec<MenuRow>>;
}

/// Write side of a menu store, used only by ingestion
pub trait MenuWriter: PartitionCatalog {
    /// Creates an empty partition table if it does not exist
    fn create_partition(&mut self, table: &str) -> StoreResult<()>;

    /// Checks whether any row for `date` at `location` is already stored
    fn has_entries(&self, table: &str, date: NaiveDate, location: Location) -> StoreResult<bool>;

    /// Appends entries to a partition, returning the number written
    fn insert(&mut self, table: &str, entries: &[MenuEntry]) -> StoreResult<usize>;

    fn begin(&mut self) -> StoreResult<()>;
    fn commit(&mut self) -> StoreResult<()>;
    fn rollback(&mut self) -> StoreResult<()>;
}

/// Opens one store connection per request.
///
/// The connection is closed when the returned value is dropped.
pub trait ConnectionFactory {
    type Connection: MenuStore;

    fn connect(&self) -> StoreResult<Self::Connection>;
}

/// Rejects anything but a plain identifier before it is spliced into SQL
pub(crate) fn ensure_identifier(table: &str) -> StoreResult<()> {
    if is_identifier(table) {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(table.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_guard() {
        assert!(ensure_identifier("menu_2025_3").is_ok());
        assert!(ensure_identifier("_x1").is_ok());
        assert!(ensure_identifier("").is_err());
        assert!(ensure_identifier("menu_2025_3; DROP TABLE x").is_err());
        assert!(ensure_identifier("9menu").is_err());

        let err = ensure_identifier("menu_2025_3'").unwrap_err();
        assert_eq!(err, StoreError::InvalidTable("menu_2025_3'".into()));
    }
}
