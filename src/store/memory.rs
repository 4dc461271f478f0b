//! In-memory menu store
//!
//! Evaluates query plans directly against row vectors, with the same
//! semantics the SQL store gets from its engine:
//! - a partition table that does not exist is a query error
//! - LIKE matching is ASCII case-insensitive, equality is exact
//! - more than one partition query means UNION, so duplicate rows collapse
//! - results are ordered by recipe, date, mealtime
//!
//! Clones share the same tables, so a clone acts as a second connection.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::NaiveDate;

use super::errors::{StoreError, StoreResult};
use super::traits::{ensure_identifier, ConnectionFactory, MenuStore, MenuWriter};
use crate::partition::PartitionCatalog;
use crate::planner::QueryPlan;
use crate::schema::{Location, MenuEntry, MenuRow};

type Tables = BTreeMap<String, Vec<MenuRow>>;

#[derive(Debug, Default)]
struct MemoryState {
    tables: Tables,
    /// Snapshot taken at `begin`, restored on `rollback`
    snapshot: Option<Tables>,
    unavailable: bool,
}

/// Shared in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts rows directly, creating the table if needed.
    ///
    /// Rows are stored as given, so tests can seed bad codes.
    pub fn seed(&self, table: &str, rows: impl IntoIterator<Item = MenuRow>) {
        self.state
            .borrow_mut()
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Makes subsequent `connect` calls fail, as if the server were down
    pub fn set_available(&self, available: bool) {
        self.state.borrow_mut().unavailable = !available;
    }

    /// Number of rows in a table (0 when absent)
    pub fn row_count(&self, table: &str) -> usize {
        self.state
            .borrow()
            .tables
            .get(table)
            .map_or(0, |rows| rows.len())
    }
}

impl PartitionCatalog for MemoryStore {
    fn table_exists(&self, table: &str) -> StoreResult<bool> {
        Ok(self.state.borrow().tables.contains_key(table))
    }

    fn list_tables(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .state
            .borrow()
            .tables
            .keys()
            .filter(|t| t.starts_with(prefix))
            .cloned()
            .collect())
    }
}

impl MenuStore for MemoryStore {
    fn fetch(&self, plan: &QueryPlan) -> StoreResult<Vec<MenuRow>> {
        let state = self.state.borrow();
        let mut rows = Vec::new();

        for query in &plan.partitions {
            let table = state
                .tables
                .get(&query.table)
                .ok_or_else(|| StoreError::Query(format!("no such table: {}", query.table)))?;

            rows.extend(
                table
                    .iter()
                    .filter(|r| query.bound.contains(r.date))
                    .filter(|r| plan.predicate.matches(&r.recipe, r.mealtime, r.location))
                    .cloned(),
            );
        }

        rows.sort_by(|a, b| {
            (&a.recipe, a.date, a.mealtime, a.location).cmp(&(&b.recipe, b.date, b.mealtime, b.location))
        });
        if plan.partitions.len() > 1 {
            rows.dedup();
        }

        Ok(rows)
    }
}

impl MenuWriter for MemoryStore {
    fn create_partition(&mut self, table: &str) -> StoreResult<()> {
        ensure_identifier(table)?;
        self.state
            .borrow_mut()
            .tables
            .entry(table.to_string())
            .or_default();
        Ok(())
    }

    fn has_entries(&self, table: &str, date: NaiveDate, location: Location) -> StoreResult<bool> {
        let state = self.state.borrow();
        let rows = state
            .tables
            .get(table)
            .ok_or_else(|| StoreError::Query(format!("no such table: {}", table)))?;
        Ok(rows
            .iter()
            .any(|r| r.date == date && r.location == location.code()))
    }

    fn insert(&mut self, table: &str, entries: &[MenuEntry]) -> StoreResult<usize> {
        let mut state = self.state.borrow_mut();
        let rows = state
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::Query(format!("no such table: {}", table)))?;
        rows.extend(entries.iter().map(MenuEntry::to_row));
        Ok(entries.len())
    }

    fn begin(&mut self) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        if state.snapshot.is_some() {
            return Err(StoreError::Transaction("transaction already open".into()));
        }
        state.snapshot = Some(state.tables.clone());
        Ok(())
    }

    fn commit(&mut self) -> StoreResult<()> {
        self.state
            .borrow_mut()
            .snapshot
            .take()
            .map(|_| ())
            .ok_or_else(|| StoreError::Transaction("no open transaction".into()))
    }

    fn rollback(&mut self) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        let snapshot = state
            .snapshot
            .take()
            .ok_or_else(|| StoreError::Transaction("no open transaction".into()))?;
        state.tables = snapshot;
        Ok(())
    }
}

impl ConnectionFactory for MemoryStore {
    type Connection = MemoryStore;

    fn connect(&self) -> StoreResult<MemoryStore> {
        if self.state.borrow().unavailable {
            return Err(StoreError::Unavailable("memory store marked offline".into()));
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterCodec, FilterContext};
    use crate::partition::TableLocator;
    use crate::planner::{HistoryScope, MatchMode, PlannerConfig, QueryBuilder};
    use crate::schema::Mealtime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(store: &MemoryStore, food: &str, raw: &str, mode: MatchMode) -> QueryPlan {
        let locator = TableLocator::new("menu").unwrap();
        let filters = FilterCodec::normalize(Some(raw), FilterContext::listing());
        QueryBuilder::new(&locator, store, PlannerConfig::default()).build(
            food,
            &filters,
            mode,
            HistoryScope::AllTime,
            date(2025, 3, 1),
        )
    }

    #[test]
    fn test_fetch_filters_and_orders() {
        let store = MemoryStore::new();
        store.seed(
            "menu_2025_3",
            [
                MenuRow::new("Pizza", date(2025, 3, 2), 3, 1),
                MenuRow::new("Cheese Pizza", date(2025, 3, 1), 2, 2),
                MenuRow::new("Pizza", date(2025, 3, 1), 2, 1),
                MenuRow::new("Pizzas", date(2025, 3, 1), 1, 1),
                MenuRow::new("Pizza", date(2025, 2, 28), 2, 1),
                MenuRow::new("Salad", date(2025, 3, 1), 2, 1),
            ],
        );
        store.seed("menu_2025_4", [MenuRow::new("pizza bagel", date(2025, 4, 1), 1, 3)]);

        let rows = store
            .fetch(&plan(&store, "Pizza", "1111111", MatchMode::PrefixOrContains))
            .unwrap();
        let recipes: Vec<&str> = rows.iter().map(|r| r.recipe.as_str()).collect();
        assert_eq!(
            recipes,
            vec!["Cheese Pizza", "Pizza", "Pizza", "Pizzas", "pizza bagel"]
        );
        assert_eq!(rows[1].date, date(2025, 3, 1));
    }

    #[test]
    fn test_fetch_missing_table_errors() {
        let store = MemoryStore::new();
        store.seed("menu_2025_3", []);
        let mut p = plan(&store, "Pizza", "1111111", MatchMode::Exact);
        p.partitions[0].table = "menu_1999_1".into();
        assert_eq!(store.fetch(&p).unwrap_err().code(), "MENU_STORE_QUERY_FAILED");
    }

    #[test]
    fn test_rollback_restores_tables() {
        let mut store = MemoryStore::new();
        store.create_partition("menu_2025_3").unwrap();
        store.begin().unwrap();
        store
            .insert(
                "menu_2025_3",
                &[MenuEntry::new("Pizza", date(2025, 3, 1), Mealtime::Lunch, Location::HallA)],
            )
            .unwrap();
        assert_eq!(store.row_count("menu_2025_3"), 1);
        store.rollback().unwrap();
        assert_eq!(store.row_count("menu_2025_3"), 0);
        assert!(store.commit().is_err());
    }

    #[test]
    fn test_has_entries_by_day_and_location() {
        let mut store = MemoryStore::new();
        store.create_partition("menu_2025_3").unwrap();
        store
            .insert(
                "menu_2025_3",
                &[MenuEntry::new("Pizza", date(2025, 3, 1), Mealtime::Lunch, Location::HallB)],
            )
            .unwrap();
        assert!(store
            .has_entries("menu_2025_3", date(2025, 3, 1), Location::HallB)
            .unwrap());
        assert!(!store
            .has_entries("menu_2025_3", date(2025, 3, 1), Location::HallA)
            .unwrap());
    }

    #[test]
    fn test_offline_store_refuses_connections() {
        let store = MemoryStore::new();
        store.set_available(false);
        assert!(store.connect().unwrap_err().is_unavailable());
        store.set_available(true);
        assert!(store.connect().is_ok());
    }
}
