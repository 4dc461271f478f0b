//! SQLite-backed menu store
//!
//! One connection per [`SqliteStore`]. Partition tables are plain SQLite
//! tables named by [`TableLocator`](crate::partition::TableLocator); dates
//! are stored as ISO `YYYY-MM-DD` text so lexical and calendar order agree.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use rusqlite::types::ToSqlOutput;
use rusqlite::{params, params_from_iter, Connection, OpenFlags, ToSql};

use super::errors::{StoreError, StoreResult};
use super::traits::{ensure_identifier, ConnectionFactory, MenuStore, MenuWriter};
use crate::partition::PartitionCatalog;
use crate::planner::{Param, QueryPlan};
use crate::schema::{Location, MenuEntry, MenuRow, COL_DATE, COL_LOCATION, COL_MEALTIME, COL_RECIPE};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl ToSql for Param {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Param::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
            Param::Date(d) => Ok(ToSqlOutput::from(d.format(DATE_FORMAT).to_string())),
        }
    }
}

/// Parses a stored date, tolerating a trailing time component
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// A single open SQLite connection
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens an existing database. A missing file is reported as
    /// unavailable rather than silently created.
    pub fn open(path: &Path, timeout: Duration) -> StoreResult<Self> {
        Self::open_with(
            path,
            timeout,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    /// Opens a database, creating the file if needed
    pub fn create(path: &Path, timeout: Duration) -> StoreResult<Self> {
        Self::open_with(
            path,
            timeout,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    fn open_with(path: &Path, timeout: Duration, flags: OpenFlags) -> StoreResult<Self> {
        let conn = Connection::open_with_flags(path, flags)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;
        conn.busy_timeout(timeout)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }
}

impl PartitionCatalog for SqliteStore {
    fn table_exists(&self, table: &str) -> StoreResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn list_tables(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND substr(name, 1, length(?1)) = ?1 \
             ORDER BY name",
        )?;
        let names = stmt
            .query_map(params![prefix], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl MenuStore for SqliteStore {
    fn fetch(&self, plan: &QueryPlan) -> StoreResult<Vec<MenuRow>> {
        let statement = match plan.to_sql() {
            Some(s) => s,
            None => return Ok(Vec::new()),
        };
        for table in plan.tables() {
            ensure_identifier(table)?;
        }

        let mut stmt = self.conn.prepare(&statement.sql)?;
        let raw = stmt
            .query_map(params_from_iter(statement.params.iter()), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(recipe, date, mealtime, location)| {
                let date = parse_date(&date).ok_or_else(|| StoreError::MalformedRow {
                    table: plan.tables().join(","),
                    reason: format!("unreadable date '{}'", date),
                })?;
                Ok(MenuRow::new(recipe, date, mealtime, location))
            })
            .collect()
    }
}

impl MenuWriter for SqliteStore {
    fn create_partition(&mut self, table: &str) -> StoreResult<()> {
        ensure_identifier(table)?;
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} ({} VARCHAR(70), {} DATE, {} INTEGER, {} INTEGER)",
            table, COL_RECIPE, COL_DATE, COL_MEALTIME, COL_LOCATION
        ))?;
        Ok(())
    }

    fn has_entries(&self, table: &str, date: NaiveDate, location: Location) -> StoreResult<bool> {
        ensure_identifier(table)?;
        let found: i64 = self.conn.query_row(
            &format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1 AND {} = ?2)",
                table, COL_DATE, COL_LOCATION
            ),
            params![Param::Date(date), location.code()],
            |row| row.get(0),
        )?;
        Ok(found != 0)
    }

    fn insert(&mut self, table: &str, entries: &[MenuEntry]) -> StoreResult<usize> {
        ensure_identifier(table)?;
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO {} ({}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4)",
            table, COL_RECIPE, COL_DATE, COL_MEALTIME, COL_LOCATION
        ))?;

        let mut written = 0;
        for entry in entries {
            written += stmt.execute(params![
                entry.recipe,
                Param::Date(entry.date),
                entry.mealtime.code(),
                entry.location.code()
            ])?;
        }
        Ok(written)
    }

    fn begin(&mut self) -> StoreResult<()> {
        self.conn
            .execute_batch("BEGIN")
            .map_err(|e| StoreError::Transaction(e.to_string()))
    }

    fn commit(&mut self) -> StoreResult<()> {
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| StoreError::Transaction(e.to_string()))
    }

    fn rollback(&mut self) -> StoreResult<()> {
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| StoreError::Transaction(e.to_string()))
    }
}

/// Opens a fresh [`SqliteStore`] for every request
#[derive(Debug, Clone)]
pub struct SqliteConnectionFactory {
    path: PathBuf,
    timeout: Duration,
}

impl SqliteConnectionFactory {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a writable connection, creating the database file if needed
    pub fn connect_writer(&self) -> StoreResult<SqliteStore> {
        SqliteStore::create(&self.path, self.timeout)
    }
}

impl ConnectionFactory for SqliteConnectionFactory {
    type Connection = SqliteStore;

    fn connect(&self) -> StoreResult<SqliteStore> {
        SqliteStore::open(&self.path, self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterCodec, FilterContext};
    use crate::partition::TableLocator;
    use crate::planner::{HistoryScope, MatchMode, PlannerConfig, QueryBuilder};
    use crate::schema::Mealtime;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store(dir: &TempDir) -> SqliteStore {
        SqliteStore::create(&dir.path().join("menu.db"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = SqliteStore::open(&dir.path().join("absent.db"), Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_catalog_lists_prefixed_tables() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        s.create_partition("menu_2025_3").unwrap();
        s.create_partition("menu_2024_12").unwrap();
        s.create_partition("other_2025_3").unwrap();

        assert!(s.table_exists("menu_2025_3").unwrap());
        assert!(!s.table_exists("menu_2025_4").unwrap());
        assert_eq!(
            s.list_tables("menu_").unwrap(),
            vec!["menu_2024_12".to_string(), "menu_2025_3".to_string()]
        );
    }

    #[test]
    fn test_insert_and_fetch_round_trip_order() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        s.create_partition("menu_2025_3").unwrap();
        s.insert(
            "menu_2025_3",
            &[
                MenuEntry::new("Pizza", date(2025, 3, 2), Mealtime::Dinner, Location::HallA),
                MenuEntry::new("Pizza", date(2025, 3, 1), Mealtime::Lunch, Location::HallC),
                MenuEntry::new("Cheese Pizza", date(2025, 3, 1), Mealtime::Lunch, Location::HallB),
            ],
        )
        .unwrap();

        let locator = TableLocator::new("menu").unwrap();
        let filters = FilterCodec::normalize(Some("1111111"), FilterContext::listing());
        let plan = QueryBuilder::new(&locator, &s, PlannerConfig::default()).build(
            "Pizza",
            &filters,
            MatchMode::PrefixOrContains,
            HistoryScope::AllTime,
            date(2025, 3, 1),
        );

        let rows = s.fetch(&plan).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].recipe, "Cheese Pizza");
        assert_eq!(rows[1].date, date(2025, 3, 1));
        assert_eq!(rows[2].mealtime, Mealtime::Dinner.code());
    }

    #[test]
    fn test_rollback_discards_inserts() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        s.create_partition("menu_2025_3").unwrap();
        s.begin().unwrap();
        s.insert(
            "menu_2025_3",
            &[MenuEntry::new("Soup", date(2025, 3, 4), Mealtime::Lunch, Location::HallA)],
        )
        .unwrap();
        assert!(s
            .has_entries("menu_2025_3", date(2025, 3, 4), Location::HallA)
            .unwrap());
        s.rollback().unwrap();
        assert!(!s
            .has_entries("menu_2025_3", date(2025, 3, 4), Location::HallA)
            .unwrap());
    }

    #[test]
    fn test_rejects_unsafe_table_names() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let err = s.create_partition("menu; DROP TABLE x").unwrap_err();
        assert_eq!(err.code(), "MENU_STORE_INVALID_TABLE");
    }

    #[test]
    fn test_parse_date_tolerates_time_suffix() {
        assert_eq!(parse_date("2025-03-01 00:00:00"), Some(date(2025, 3, 1)));
        assert_eq!(parse_date("2025-03-01"), Some(date(2025, 3, 1)));
        assert_eq!(parse_date("March"), None);
    }
}
