//! Date windows per time mode, split at partition boundaries
//!
//! Each time mode selects a date window relative to today. A window that
//! crosses a month boundary touches several partitions; every touched
//! partition gets its own [`DateBound`] covering just its slice of the
//! window.

use chrono::{Duration, NaiveDate};

use super::ast::{DateBound, HistoryScope};
use crate::filters::TimeMode;
use crate::partition::{month_range, PartitionKey};

/// One partition touched by a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionSpan {
    pub key: PartitionKey,
    pub bound: DateBound,
}

impl PartitionSpan {
    fn new(key: PartitionKey, bound: DateBound) -> Self {
        Self { key, bound }
    }
}

/// Computes partition spans for a given day
#[derive(Debug, Clone, Copy)]
pub struct WindowAnalyzer {
    today: NaiveDate,
    short_limit_days: u32,
    epoch: PartitionKey,
}

impl WindowAnalyzer {
    pub fn new(today: NaiveDate, short_limit_days: u32, epoch: PartitionKey) -> Self {
        Self {
            today,
            short_limit_days,
            epoch,
        }
    }

    /// Spans for `time_mode`, oldest partition first.
    ///
    /// `History` spans start at the epoch; when the epoch lies after the
    /// current month the result is empty.
    pub fn spans(&self, time_mode: TimeMode, scope: HistoryScope) -> Vec<PartitionSpan> {
        match time_mode {
            TimeMode::Short => self.short(),
            TimeMode::Future => self.future(),
            TimeMode::History => self.history(scope),
        }
    }

    /// Last day of the short window (inclusive)
    pub fn short_window_end(&self) -> NaiveDate {
        let extra = i64::from(self.short_limit_days.max(1) - 1);
        self.today + Duration::days(extra)
    }

    /// `[today, today + limit - 1]`, one BETWEEN slice per month touched
    fn short(&self) -> Vec<PartitionSpan> {
        let start = self.today;
        let end = self.short_window_end();

        month_range(start, end)
            .into_iter()
            .map(|first| {
                let key = PartitionKey::of(first);
                let lo = start.max(key.first_day());
                let hi = end.min(key.last_day());
                PartitionSpan::new(key, DateBound::Between(lo, hi))
            })
            .collect()
    }

    /// Today onwards in this month, then all of next month
    fn future(&self) -> Vec<PartitionSpan> {
        let current = PartitionKey::of(self.today);
        vec![
            PartitionSpan::new(current, DateBound::From(self.today)),
            PartitionSpan::new(current.next(), DateBound::Unbounded),
        ]
    }

    fn history(&self, scope: HistoryScope) -> Vec<PartitionSpan> {
        let current = PartitionKey::of(self.today);
        if self.epoch > current {
            return Vec::new();
        }

        let mut spans: Vec<PartitionSpan> = month_range(self.epoch.first_day(), self.today)
            .into_iter()
            .map(|first| PartitionSpan::new(PartitionKey::of(first), DateBound::Unbounded))
            .collect();

        match scope {
            HistoryScope::AllTime => {
                spans.push(PartitionSpan::new(current.next(), DateBound::Unbounded));
            }
            HistoryScope::PastOnly => {
                if let Some(last) = spans.last_mut() {
                    last.bound = DateBound::Before(self.today);
                }
            }
        }

        spans
    }
}
