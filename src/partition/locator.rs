//! Monthly partition naming and calendar arithmetic
//!
//! Partition tables are named `{prefix}_{year}_{month}` with an unpadded
//! month, e.g. `menu_2025_3`.

use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use super::catalog::PartitionCatalog;
use super::errors::{PartitionError, PartitionResult};
use crate::observability::Logger;

static IDENTIFIER: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Checks that `name` is a plain SQL identifier.
///
/// Both table prefixes and full partition names pass through here before
/// they are spliced into SQL text.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$"))
        .as_ref()
        .map_or(false, |re| re.is_match(name))
}

/// Year and month identifying one partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey {
    pub year: i32,
    pub month: u32,
}

impl PartitionKey {
    /// Returns `None` for a month outside 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First calendar day of this month
    pub fn first_day(&self) -> NaiveDate {
        // year/month are range-checked at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of this month
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// The following month, rolling December over into January
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// First day of the month after `date`'s month
pub fn next_month(date: NaiveDate) -> NaiveDate {
    PartitionKey::of(date).next().first_day()
}

/// First day of every month from `start`'s month through `end`'s month,
/// inclusive. Empty when `start` falls in a later month than `end`.
pub fn month_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let last = PartitionKey::of(end);
    let mut key = PartitionKey::of(start);
    let mut months = Vec::new();

    while key <= last {
        months.push(key.first_day());
        key = key.next();
    }

    months
}

/// Maps dates to partition table names for one configured prefix.
#[derive(Debug, Clone)]
pub struct TableLocator {
    prefix: String,
    name_pattern: Regex,
}

impl TableLocator {
    /// Creates a locator.
    ///
    /// Table names are spliced into SQL text, so the prefix must be a plain
    /// identifier.
    pub fn new(prefix: impl Into<String>) -> PartitionResult<Self> {
        let prefix = prefix.into();

        if !is_identifier(&prefix) {
            return Err(PartitionError::InvalidPrefix(prefix));
        }

        let name_pattern = Regex::new(&format!(
            r"^{}_(\d{{4}})_(\d{{1,2}})$",
            regex::escape(&prefix)
        ))
        .map_err(|e| PartitionError::Pattern(e.to_string()))?;

        Ok(Self {
            prefix,
            name_pattern,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name of the partition holding `date`
    pub fn table_name_for(&self, date: NaiveDate) -> String {
        self.table_name(PartitionKey::of(date))
    }

    /// Name of the partition for `key`
    pub fn table_name(&self, key: PartitionKey) -> String {
        format!("{}_{}_{}", self.prefix, key.year, key.month)
    }

    /// Parses a table name back into its partition key.
    ///
    /// Returns `None` for tables that are not partitions under this prefix.
    pub fn partition_of(&self, table: &str) -> Option<PartitionKey> {
        let caps = self.name_pattern.captures(table)?;
        let year = caps.get(1)?.as_str().parse().ok()?;
        let month = caps.get(2)?.as_str().parse().ok()?;
        let key = PartitionKey::new(year, month)?;

        // reject zero-padded months; they never come from table_name()
        (self.table_name(key) == table).then_some(key)
    }

    /// Checks whether a partition table is present.
    ///
    /// Never fails: a catalog error is logged and reported as absent.
    pub fn exists<C: PartitionCatalog + ?Sized>(&self, catalog: &C, table: &str) -> bool {
        match catalog.table_exists(table) {
            Ok(found) => found,
            Err(e) => {
                Logger::warn(
                    "PARTITION_LOOKUP_FAILED",
                    &[("table", table), ("reason", e.to_string().as_str())],
                );
                false
            }
        }
    }

    /// Lists existing partitions under this prefix, oldest first.
    pub fn list_partitions<C: PartitionCatalog + ?Sized>(
        &self,
        catalog: &C,
    ) -> PartitionResult<Vec<PartitionKey>> {
        let tables = catalog
            .list_tables(&self.prefix)
            .map_err(|e| PartitionError::Catalog(e.to_string()))?;

        let mut keys: Vec<PartitionKey> = tables
            .iter()
            .filter_map(|t| self.partition_of(t))
            .collect();
        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}
