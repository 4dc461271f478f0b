//! Scraped menu input

use std::io::BufRead;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{IngestError, IngestResult};
use crate::schema::{Location, Mealtime, MenuEntry, RECIPE_MAX_LEN};

/// Recipes served at one meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealMenu {
    pub mealtime: Mealtime,
    pub recipes: Vec<String>,
}

/// Everything one hall served on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDay {
    pub date: NaiveDate,
    pub location: Location,
    #[serde(default)]
    pub meals: Vec<MealMenu>,
}

impl MenuDay {
    /// Rows to store, recipe names cleaned; blank names are dropped
    pub fn entries(&self) -> Vec<MenuEntry> {
        self.meals
            .iter()
            .flat_map(|meal| {
                meal.recipes.iter().filter_map(move |name| {
                    clean_recipe(name)
                        .map(|recipe| MenuEntry::new(recipe, self.date, meal.mealtime, self.location))
                })
            })
            .collect()
    }

    /// Reads one JSON object per line, ignoring blank lines
    pub fn read_json_lines<R: BufRead>(reader: R) -> IngestResult<Vec<MenuDay>> {
        let mut days = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let day = serde_json::from_str(&line).map_err(|e| IngestError::Parse {
                line: i + 1,
                reason: e.to_string(),
            })?;
            days.push(day);
        }
        Ok(days)
    }
}

/// Strips trailing non-breaking spaces and cuts the name to the column width
pub fn clean_recipe(name: &str) -> Option<String> {
    let trimmed = name.trim_end_matches('\u{a0}');
    if trimmed.trim().is_empty() {
        return None;
    }
    Some(trimmed.chars().take(RECIPE_MAX_LEN).collect())
}
