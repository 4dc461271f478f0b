//! Search Invariant Tests
//!
//! End-to-end searches against an on-disk SQLite store:
//! - Window splitting across monthly partitions
//! - Missing partitions contribute zero rows
//! - Food names are always bound, never spliced
//! - Unknown codes fail the whole load
//! - Connection failures surface as MENU_STORE_UNAVAILABLE

use std::time::Duration;

use chrono::NaiveDate;
use menudb::partition::TableLocator;
use menudb::planner::{MatchMode, PlannerConfig};
use menudb::repository::{FixedClock, MenuRepository, SearchRequest};
use menudb::schema::{Location, Mealtime, MenuEntry};
use menudb::store::{MenuWriter, SqliteConnectionFactory, SqliteStore};
use rusqlite::Connection;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(recipe: &str, d: NaiveDate, meal: Mealtime, hall: Location) -> MenuEntry {
    MenuEntry::new(recipe, d, meal, hall)
}

/// Creates a database with the given partitions and rows
fn setup_store(tables: &[(&str, Vec<MenuEntry>)]) -> (TempDir, SqliteConnectionFactory) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("menu.db");
    let mut store = SqliteStore::create(&path, Duration::from_secs(5)).unwrap();

    store.create_partition("menu_2024_7").unwrap();
    for (table, rows) in tables {
        store.create_partition(table).unwrap();
        store.insert(table, rows).unwrap();
    }

    (tmp, SqliteConnectionFactory::new(path, Duration::from_secs(5)))
}

fn repository(
    factory: SqliteConnectionFactory,
    today: NaiveDate,
) -> MenuRepository<SqliteConnectionFactory, FixedClock> {
    MenuRepository::new(
        factory,
        TableLocator::new("menu").unwrap(),
        PlannerConfig::default(),
    )
    .with_clock(FixedClock(today))
}

// =============================================================================
// Partition Selection
// =============================================================================

/// Pizza in the future view on 2025-03-01 reads March from today on and,
/// when it exists, all of April; rows come back ordered by recipe, date,
/// mealtime.
#[test]
fn test_pizza_future_reads_current_and_next_month() {
    let (_tmp, factory) = setup_store(&[
        (
            "menu_2025_3",
            vec![
                entry("Pizza", date(2025, 3, 9), Mealtime::Dinner, Location::HallA),
                entry("Pizza", date(2025, 3, 1), Mealtime::Dinner, Location::HallB),
                entry("Pizza", date(2025, 3, 1), Mealtime::Lunch, Location::HallC),
                entry("Pepperoni Pizza", date(2025, 3, 2), Mealtime::Lunch, Location::HallA),
                entry("Pizza", date(2025, 2, 27), Mealtime::Lunch, Location::HallA),
            ],
        ),
        (
            "menu_2025_4",
            vec![entry("Pizza", date(2025, 4, 2), Mealtime::Breakfast, Location::HallA)],
        ),
    ]);

    let repo = repository(factory, date(2025, 3, 1));
    let rows = repo
        .load_summary(&SearchRequest::summary("Pizza", Some("1111111")))
        .unwrap();

    let seen: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|r| (r.recipe.as_str(), r.relative_day.as_str(), r.mealtime.as_str()))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("Pepperoni Pizza", "Tomorrow", "Lunch"),
            ("Pizza", "Today", "Lunch"),
            ("Pizza", "Today", "Dinner"),
            ("Pizza", "Sunday", "Dinner"),
            ("Pizza", "Wednesday", "Breakfast"),
        ]
    );
}

/// Pizza with the default filters on 2025-03-01 is a short-window search:
/// one March fragment bounded to the first three days, even with April
/// present.
#[test]
fn test_pizza_default_filters_read_short_window() {
    let (_tmp, factory) = setup_store(&[
        (
            "menu_2025_3",
            vec![
                entry("Pizza", date(2025, 3, 3), Mealtime::Dinner, Location::HallA),
                entry("Pizza", date(2025, 3, 1), Mealtime::Dinner, Location::HallB),
                entry("Pizza", date(2025, 3, 1), Mealtime::Lunch, Location::HallC),
                entry("Pizza", date(2025, 3, 4), Mealtime::Lunch, Location::HallA),
            ],
        ),
        (
            "menu_2025_4",
            vec![entry("Pizza", date(2025, 4, 2), Mealtime::Breakfast, Location::HallA)],
        ),
    ]);
    let repo = repository(factory, date(2025, 3, 1));
    let request = SearchRequest::summary("Pizza", Some("0111111"));

    let plan = repo.explain(&request).unwrap();
    assert_eq!(plan.time_mode, "short");
    assert_eq!(plan.partitions.len(), 1);
    assert_eq!(plan.partitions[0].table, "menu_2025_3");
    let sql = plan.sql.unwrap();
    assert!(sql.contains("FROM menu_2025_3"));
    assert!(sql.contains("[Date] BETWEEN '2025-03-01' AND '2025-03-03'"));
    assert!(!sql.contains("menu_2025_4"));
    assert!(sql.ends_with("ORDER BY Recipe, [Date], Mealtime"));

    let rows = repo.load_summary(&request).unwrap();
    let seen: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.relative_day.as_str(), r.mealtime.as_str()))
        .collect();
    assert_eq!(
        seen,
        vec![("Today", "Lunch"), ("Today", "Dinner"), ("Monday", "Dinner")]
    );
}

/// When next month's partition is absent, only the current month is read.
#[test]
fn test_future_without_next_month_uses_one_partition() {
    let (_tmp, factory) = setup_store(&[(
        "menu_2025_3",
        vec![entry("Pizza", date(2025, 3, 4), Mealtime::Lunch, Location::HallA)],
    )]);

    let repo = repository(factory, date(2025, 3, 1));
    let plan = repo
        .explain(&SearchRequest::summary("Pizza", Some("1111111")))
        .unwrap();
    assert_eq!(plan.partitions.len(), 1);
    assert_eq!(plan.missing, vec!["menu_2025_4".to_string()]);

    let rows = repo
        .load_summary(&SearchRequest::summary("Pizza", Some("1111111")))
        .unwrap();
    assert_eq!(rows.len(), 1);
}

/// A short window crossing January into February returns rows from both.
#[test]
fn test_short_window_spans_two_partitions() {
    let (_tmp, factory) = setup_store(&[
        (
            "menu_2025_1",
            vec![
                entry("Soup", date(2025, 1, 31), Mealtime::Lunch, Location::HallA),
                entry("Soup", date(2025, 1, 29), Mealtime::Lunch, Location::HallA),
            ],
        ),
        (
            "menu_2025_2",
            vec![
                entry("Soup", date(2025, 2, 1), Mealtime::Lunch, Location::HallA),
                entry("Soup", date(2025, 2, 2), Mealtime::Lunch, Location::HallA),
                entry("Soup", date(2025, 2, 3), Mealtime::Lunch, Location::HallA),
            ],
        ),
    ]);

    let repo = repository(factory, date(2025, 1, 31));
    let rows = repo
        .load_summary(&SearchRequest::summary("Soup", Some("0111111")))
        .unwrap();
    let days: Vec<&str> = rows.iter().map(|r| r.relative_day.as_str()).collect();
    assert_eq!(days, vec!["Today", "Tomorrow", "Sunday"]);
}

/// Detail history stops before today and formats absolute dates.
#[test]
fn test_detail_history_excludes_today() {
    let (_tmp, factory) = setup_store(&[(
        "menu_2025_3",
        vec![
            entry("Pizza", date(2025, 3, 5), Mealtime::Lunch, Location::HallA),
            entry("Pizza", date(2025, 3, 6), Mealtime::Lunch, Location::HallA),
            entry("Pizza Bagel", date(2025, 3, 5), Mealtime::Lunch, Location::HallA),
        ],
    )]);

    let repo = repository(factory, date(2025, 3, 6));
    let rows = repo
        .load_detail(&SearchRequest::detail("Pizza", Some("2111111")))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].formatted_date, "5 March '25");
    assert_eq!(rows[0].location, "Kins");
}

// =============================================================================
// Predicates
// =============================================================================

/// Meal and hall filters restrict rows; switching every meal off leaves
/// meals unrestricted rather than emptying the result.
#[test]
fn test_meal_and_hall_filters() {
    let (_tmp, factory) = setup_store(&[(
        "menu_2025_3",
        vec![
            entry("Rice", date(2025, 3, 1), Mealtime::Breakfast, Location::HallA),
            entry("Rice", date(2025, 3, 1), Mealtime::Lunch, Location::HallB),
            entry("Rice", date(2025, 3, 1), Mealtime::Dinner, Location::HallC),
        ],
    )]);
    let repo = repository(factory, date(2025, 3, 1));

    let rows = repo
        .load_summary(&SearchRequest::summary("Rice", Some("0011011")))
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.mealtime != "Breakfast"));

    let rows = repo
        .load_summary(&SearchRequest::summary("Rice", Some("0000111")))
        .unwrap();
    let meals: Vec<&str> = rows.iter().map(|r| r.mealtime.as_str()).collect();
    assert_eq!(meals, vec!["Breakfast", "Lunch", "Dinner"]);

    let plan = repo
        .explain(&SearchRequest::summary("Rice", Some("0000000")))
        .unwrap();
    let sql = plan.sql.unwrap();
    assert!(!sql.contains("Mealtime="));
    assert!(!sql.contains("Location="));
}

/// Word-start matching finds inner words but not mid-word fragments.
#[test]
fn test_word_start_matching() {
    let (_tmp, factory) = setup_store(&[(
        "menu_2025_3",
        vec![
            entry("Chicken Tenders", date(2025, 3, 1), Mealtime::Lunch, Location::HallA),
            entry("Fried chicken", date(2025, 3, 1), Mealtime::Lunch, Location::HallA),
            entry("Spatchcock", date(2025, 3, 1), Mealtime::Lunch, Location::HallA),
        ],
    )]);
    let repo = repository(factory, date(2025, 3, 1));

    let rows = repo
        .load_summary(&SearchRequest::summary("chick", None))
        .unwrap();
    let recipes: Vec<&str> = rows.iter().map(|r| r.recipe.as_str()).collect();
    assert_eq!(recipes, vec!["Chicken Tenders", "Fried chicken"]);

    let exact = repo
        .load_summary(
            &SearchRequest::summary("Chicken Tenders", None).with_match_mode(MatchMode::Exact),
        )
        .unwrap();
    assert_eq!(exact.len(), 1);
}

/// Quotes and LIKE wildcards in food names are data, not SQL.
#[test]
fn test_hostile_food_names_are_bound() {
    let (tmp, factory) = setup_store(&[(
        "menu_2025_3",
        vec![
            entry("O'Brien's Stew", date(2025, 3, 1), Mealtime::Dinner, Location::HallA),
            entry("100% Juice", date(2025, 3, 1), Mealtime::Breakfast, Location::HallA),
            entry("1000 Island Salad", date(2025, 3, 1), Mealtime::Lunch, Location::HallA),
        ],
    )]);
    let repo = repository(factory, date(2025, 3, 1));

    let rows = repo
        .load_summary(&SearchRequest::summary("O'Brien's", None))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].recipe, "O'Brien's Stew");

    let rows = repo.load_summary(&SearchRequest::summary("100%", None)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].recipe, "100% Juice");

    let rows = repo
        .load_summary(&SearchRequest::summary("x'; DROP TABLE menu_2025_3; --", None))
        .unwrap();
    assert!(rows.is_empty());

    let conn = Connection::open(tmp.path().join("menu.db")).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM menu_2025_3", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 3);
}

// =============================================================================
// Failures
// =============================================================================

/// A stored mealtime code outside 1-3 fails the load and names the recipe.
#[test]
fn test_unknown_mealtime_code_fails_load() {
    let (tmp, factory) = setup_store(&[(
        "menu_2025_3",
        vec![entry("Pizza", date(2025, 3, 1), Mealtime::Lunch, Location::HallA)],
    )]);
    let conn = Connection::open(tmp.path().join("menu.db")).unwrap();
    conn.execute(
        "INSERT INTO menu_2025_3 (Recipe, [Date], Mealtime, Location) VALUES ('Pizza', '2025-03-02', 9, 1)",
        [],
    )
    .unwrap();

    let err = repository(factory, date(2025, 3, 1))
        .load_summary(&SearchRequest::summary("Pizza", None))
        .unwrap_err();
    assert_eq!(err.code(), "MENU_INVALID_MEALTIME_CODE");
    assert!(err.to_string().contains("Pizza"));
}

/// A database file that does not exist is unavailable, not empty.
#[test]
fn test_missing_database_is_unavailable() {
    let tmp = TempDir::new().unwrap();
    let factory = SqliteConnectionFactory::new(tmp.path().join("nope.db"), Duration::from_secs(1));

    let err = repository(factory, date(2025, 3, 1))
        .load_summary(&SearchRequest::summary("Pizza", None))
        .unwrap_err();
    assert_eq!(err.code(), "MENU_STORE_UNAVAILABLE");
    assert!(!tmp.path().join("nope.db").exists());
}
