//! Partition presence lookups

use std::collections::BTreeSet;

use crate::store::StoreResult;

/// Read-only view of which tables a store holds
pub trait PartitionCatalog {
    /// Checks whether a table with exactly this name exists
    fn table_exists(&self, table: &str) -> StoreResult<bool>;

    /// Lists table names starting with `prefix`
    fn list_tables(&self, prefix: &str) -> StoreResult<Vec<String>>;
}

/// A fixed set of table names, for planning without a live store
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: BTreeSet<String>,
}

impl StaticCatalog {
    pub fn new(tables: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            tables: tables.into_iter().map(Into::into).collect(),
        }
    }
}

impl PartitionCatalog for StaticCatalog {
    fn table_exists(&self, table: &str) -> StoreResult<bool> {
        Ok(self.tables.contains(table))
    }

    fn list_tables(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .tables
            .iter()
            .filter(|t| t.starts_with(prefix))
            .cloned()
            .collect())
    }
}
