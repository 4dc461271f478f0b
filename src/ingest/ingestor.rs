//! Batch writer for scraped menus
//!
//! A batch is all-or-nothing: partitions are created on demand, days whose
//! (date, hall) is already stored are skipped, and every insert runs in a
//! single transaction that is rolled back on the first failure.

use serde::Serialize;

use super::errors::{IngestError, IngestResult};
use super::types::MenuDay;
use crate::observability::{Logger, ObservationScope};
use crate::partition::TableLocator;
use crate::store::MenuWriter;

/// Outcome of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub days_written: usize,
    pub days_skipped: usize,
    pub rows_inserted: usize,
    /// Partitions written to, in first-touched order
    pub partitions: Vec<String>,
}

pub struct MenuIngestor<'a, W: MenuWriter> {
    writer: &'a mut W,
    locator: &'a TableLocator,
}

impl<'a, W: MenuWriter> MenuIngestor<'a, W> {
    pub fn new(writer: &'a mut W, locator: &'a TableLocator) -> Self {
        Self { writer, locator }
    }

    pub fn ingest(&mut self, days: &[MenuDay]) -> IngestResult<IngestReport> {
        let scope = ObservationScope::with_fields(
            "MENU_INGEST",
            &[("days", days.len().to_string().as_str())],
        );

        if let Err(e) = self.writer.begin() {
            let err = IngestError::from(e);
            scope.fail(err.code(), err.to_string().as_str());
            return Err(err);
        }

        match self.write_all(days) {
            Ok(report) => {
                if let Err(e) = self.writer.commit() {
                    let err = IngestError::from(e);
                    scope.fail(err.code(), err.to_string().as_str());
                    return Err(err);
                }
                scope.complete_with_fields(&[
                    ("days_written", report.days_written.to_string().as_str()),
                    ("days_skipped", report.days_skipped.to_string().as_str()),
                    ("rows", report.rows_inserted.to_string().as_str()),
                ]);
                Ok(report)
            }
            Err(e) => {
                if let Err(rollback) = self.writer.rollback() {
                    Logger::error(
                        "MENU_INGEST_ROLLBACK_FAILED",
                        &[("reason", rollback.to_string().as_str())],
                    );
                }
                scope.fail(e.code(), e.to_string().as_str());
                Err(e)
            }
        }
    }

    fn write_all(&mut self, days: &[MenuDay]) -> IngestResult<IngestReport> {
        let mut report = IngestReport::default();

        for day in days {
            let table = self.locator.table_name_for(day.date);
            let date = day.date.to_string();

            if !self.writer.table_exists(&table)? {
                self.writer.create_partition(&table)?;
                Logger::info("MENU_PARTITION_CREATED", &[("table", table.as_str())]);
            }

            if self.writer.has_entries(&table, day.date, day.location)? {
                Logger::trace(
                    "MENU_INGEST_DAY_SKIPPED",
                    &[("date", date.as_str()), ("location", day.location.label())],
                );
                report.days_skipped += 1;
                continue;
            }

            let entries = day.entries();
            if entries.is_empty() {
                Logger::warn(
                    "MENU_INGEST_EMPTY_DAY",
                    &[("date", date.as_str()), ("location", day.location.label())],
                );
                report.days_skipped += 1;
                continue;
            }

            report.rows_inserted += self.writer.insert(&table, &entries)?;
            report.days_written += 1;
            if !report.partitions.contains(&table) {
                report.partitions.push(table);
            }
        }

        Ok(report)
    }
}
