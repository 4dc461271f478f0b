//! Output records for the two search views

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::schema::MenuEntry;

/// Listing row: when relative to today, which meal, which hall
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub recipe: String,
    pub relative_day: String,
    pub mealtime: String,
    pub location: String,
}

impl SummaryRow {
    pub fn from_entry(entry: &MenuEntry, today: NaiveDate) -> Self {
        Self {
            recipe: entry.recipe.clone(),
            relative_day: relative_day(entry.date, today),
            mealtime: entry.mealtime.label().to_string(),
            location: entry.location.label().to_string(),
        }
    }
}

/// Detail row with an absolute date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub recipe: String,
    pub formatted_date: String,
    pub mealtime: String,
    pub location: String,
}

impl DetailRow {
    pub fn from_entry(entry: &MenuEntry) -> Self {
        Self {
            recipe: entry.recipe.clone(),
            formatted_date: format_detail_date(entry.date),
            mealtime: entry.mealtime.label().to_string(),
            location: entry.location.label().to_string(),
        }
    }
}

/// "Today", "Tomorrow", otherwise the weekday name
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.succ_opt() == Some(date) {
        "Tomorrow".to_string()
    } else {
        date.format("%A").to_string()
    }
}

/// `5 March '25`
pub fn format_detail_date(date: NaiveDate) -> String {
    format!("{} {} '{}", date.day(), date.format("%B"), date.format("%y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Location, Mealtime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_relative_day() {
        let today = date(2025, 3, 1);
        assert_eq!(relative_day(today, today), "Today");
        assert_eq!(relative_day(date(2025, 3, 2), today), "Tomorrow");
        // 2025-03-03 is a Monday
        assert_eq!(relative_day(date(2025, 3, 3), today), "Monday");
        assert_eq!(relative_day(date(2025, 2, 28), today), "Friday");
    }

    #[test]
    fn test_tomorrow_across_year() {
        assert_eq!(relative_day(date(2025, 1, 1), date(2024, 12, 31)), "Tomorrow");
    }

    #[test]
    fn test_detail_date_format() {
        assert_eq!(format_detail_date(date(2025, 3, 5)), "5 March '25");
        assert_eq!(format_detail_date(date(2024, 11, 21)), "21 November '24");
        assert_eq!(format_detail_date(date(2009, 1, 1)), "1 January '09");
    }

    #[test]
    fn test_rows_use_labels() {
        let entry = MenuEntry::new("Pizza", date(2025, 3, 1), Mealtime::Dinner, Location::HallC);
        let row = SummaryRow::from_entry(&entry, date(2025, 3, 1));
        assert_eq!(row.relative_day, "Today");
        assert_eq!(row.mealtime, "Dinner");
        assert_eq!(row.location, "JCL");
        assert_eq!(DetailRow::from_entry(&entry).formatted_date, "1 March '25");
    }
}
