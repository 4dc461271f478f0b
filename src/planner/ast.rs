//! Predicate structures shared by every partition fragment of a plan

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::{Location, Mealtime, COL_DATE, COL_LOCATION, COL_MEALTIME, COL_RECIPE};

/// How the food name is compared against stored recipe names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Recipe equals the food name
    Exact,
    /// Recipe starts with the food name, or contains it right after a space
    PrefixOrContains,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::PrefixOrContains => "prefix_or_contains",
        }
    }
}

/// Meaning of the third time-mode state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryScope {
    /// Every month since the epoch, plus next month when present
    AllTime,
    /// Every month since the epoch, stopping before today
    PastOnly,
}

/// A bound query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Text(String),
    Date(NaiveDate),
}

impl Param {
    /// Renders the value as an SQL literal with quotes doubled
    pub fn to_literal(&self) -> String {
        match self {
            Param::Text(s) => quote_literal(s),
            Param::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        }
    }
}

/// Wraps a string in single quotes, doubling any embedded quote
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Escape character used in every LIKE pattern
pub const LIKE_ESCAPE: char = '\\';

/// Escapes LIKE wildcards so the value matches literally
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Recipe name predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeMatch {
    /// `Recipe = ?`
    Exact(String),
    /// `Recipe LIKE '% name%' OR Recipe LIKE 'name%'`
    WordStart(String),
}

impl RecipeMatch {
    pub fn new(food: &str, mode: MatchMode) -> Self {
        match mode {
            MatchMode::Exact => RecipeMatch::Exact(food.to_string()),
            MatchMode::PrefixOrContains => RecipeMatch::WordStart(food.to_string()),
        }
    }

    pub fn food(&self) -> &str {
        match self {
            RecipeMatch::Exact(food) | RecipeMatch::WordStart(food) => food,
        }
    }

    /// SQL text with `?` placeholders, plus the values to bind
    pub fn to_sql(&self) -> (String, Vec<Param>) {
        match self {
            RecipeMatch::Exact(food) => (
                format!("{} = ?", COL_RECIPE),
                vec![Param::Text(food.clone())],
            ),
            RecipeMatch::WordStart(food) => {
                let escaped = escape_like(food);
                (
                    format!(
                        "({col} LIKE ? ESCAPE '{esc}' OR {col} LIKE ? ESCAPE '{esc}')",
                        col = COL_RECIPE,
                        esc = LIKE_ESCAPE
                    ),
                    vec![
                        Param::Text(format!("% {}%", escaped)),
                        Param::Text(format!("{}%", escaped)),
                    ],
                )
            }
        }
    }

    /// Evaluates the predicate against a recipe name the way the store does
    /// (LIKE is ASCII case-insensitive, equality is exact).
    pub fn matches(&self, recipe: &str) -> bool {
        match self {
            RecipeMatch::Exact(food) => recipe == food,
            RecipeMatch::WordStart(food) => {
                let recipe = recipe.to_ascii_lowercase();
                let food = food.to_ascii_lowercase();
                recipe.starts_with(&food) || recipe.contains(&format!(" {}", food))
            }
        }
    }
}

/// Narrows `active` to a restriction, or `None` when it restricts nothing:
/// either it selects the whole of `full`, or it selects nothing at all.
pub fn restriction<T: Copy + PartialEq>(active: &[T], full: &[T]) -> Option<Vec<T>> {
    if active.is_empty() || full.iter().all(|item| active.contains(item)) {
        None
    } else {
        Some(active.to_vec())
    }
}

/// OR-group over a code column
fn choice_sql(column: &str, codes: impl Iterator<Item = i64>) -> String {
    let terms: Vec<String> = codes.map(|c| format!("{}={}", column, c)).collect();
    format!("({})", terms.join(" OR "))
}

/// WHERE predicate shared by all fragments (everything except the date)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub recipe: RecipeMatch,
    /// `None` means every mealtime
    pub mealtimes: Option<Vec<Mealtime>>,
    /// `None` means every location
    pub locations: Option<Vec<Location>>,
}

impl Predicate {
    /// Conjunction terms in output order, with parameters
    pub fn to_sql_terms(&self) -> (Vec<String>, Vec<Param>) {
        let (recipe_sql, params) = self.recipe.to_sql();
        let mut terms = vec![recipe_sql];

        if let Some(meals) = &self.mealtimes {
            terms.push(choice_sql(COL_MEALTIME, meals.iter().map(|m| m.code())));
        }
        if let Some(locations) = &self.locations {
            terms.push(choice_sql(COL_LOCATION, locations.iter().map(|l| l.code())));
        }

        (terms, params)
    }

    pub fn matches(&self, recipe: &str, mealtime: i64, location: i64) -> bool {
        self.recipe.matches(recipe)
            && self
                .mealtimes
                .as_ref()
                .map_or(true, |m| m.iter().any(|m| m.code() == mealtime))
            && self
                .locations
                .as_ref()
                .map_or(true, |l| l.iter().any(|l| l.code() == location))
    }
}

/// Date restriction of one partition fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Whole partition
    Unbounded,
    /// `Date BETWEEN lo AND hi` (inclusive)
    Between(NaiveDate, NaiveDate),
    /// `Date >= from`
    From(NaiveDate),
    /// `Date < before`
    Before(NaiveDate),
}

impl DateBound {
    pub fn to_sql(&self) -> Option<(String, Vec<Param>)> {
        match *self {
            DateBound::Unbounded => None,
            DateBound::Between(lo, hi) => Some((
                format!("{} BETWEEN ? AND ?", COL_DATE),
                vec![Param::Date(lo), Param::Date(hi)],
            )),
            DateBound::From(from) => Some((format!("{} >= ?", COL_DATE), vec![Param::Date(from)])),
            DateBound::Before(before) => {
                Some((format!("{} < ?", COL_DATE), vec![Param::Date(before)]))
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateBound::Unbounded => true,
            DateBound::Between(lo, hi) => lo <= date && date <= hi,
            DateBound::From(from) => date >= from,
            DateBound::Before(before) => date < before,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DateBound::Unbounded => "whole month".to_string(),
            DateBound::Between(lo, hi) => format!("{} to {}", lo, hi),
            DateBound::From(from) => format!("from {}", from),
            DateBound::Before(before) => format!("before {}", before),
        }
    }
}

/// Result ordering column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Recipe,
    Date,
    Mealtime,
}

impl SortKey {
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Recipe => COL_RECIPE,
            SortKey::Date => COL_DATE,
            SortKey::Mealtime => COL_MEALTIME,
        }
    }
}

/// Ordering applied once to the unioned result
pub const ORDER_BY: [SortKey; 3] = [SortKey::Recipe, SortKey::Date, SortKey::Mealtime];
