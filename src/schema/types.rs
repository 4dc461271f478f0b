//! Menu row types and the partition table layout
//!
//! Every monthly partition has the same four columns:
//! - Recipe: VARCHAR(70)
//! - Date: calendar date
//! - Mealtime: INT code 1-3
//! - Location: INT code 1-3

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Maximum stored length of a recipe name, in characters
pub const RECIPE_MAX_LEN: usize = 70;

/// Column names as they appear in partition tables
pub const COL_RECIPE: &str = "Recipe";
pub const COL_DATE: &str = "[Date]";
pub const COL_MEALTIME: &str = "Mealtime";
pub const COL_LOCATION: &str = "Location";

/// Meal period a recipe was served at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mealtime {
    Breakfast,
    Lunch,
    Dinner,
}

impl Mealtime {
    /// All mealtimes in code order
    pub const ALL: [Mealtime; 3] = [Mealtime::Breakfast, Mealtime::Lunch, Mealtime::Dinner];

    /// Returns the stored integer code
    pub fn code(&self) -> i64 {
        match self {
            Mealtime::Breakfast => 1,
            Mealtime::Lunch => 2,
            Mealtime::Dinner => 3,
        }
    }

    /// Decodes a stored code, failing on anything outside 1-3
    pub fn from_code(code: i64) -> SchemaResult<Self> {
        match code {
            1 => Ok(Mealtime::Breakfast),
            2 => Ok(Mealtime::Lunch),
            3 => Ok(Mealtime::Dinner),
            other => Err(SchemaError::InvalidMealtimeCode(other)),
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Mealtime::Breakfast => "Breakfast",
            Mealtime::Lunch => "Lunch",
            Mealtime::Dinner => "Dinner",
        }
    }

    /// Looks a mealtime up by its display label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Mealtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dining hall a recipe was served at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    HallA,
    HallB,
    HallC,
}

impl Location {
    /// All locations in code order
    pub const ALL: [Location; 3] = [Location::HallA, Location::HallB, Location::HallC];

    /// Returns the stored integer code
    pub fn code(&self) -> i64 {
        match self {
            Location::HallA => 1,
            Location::HallB => 2,
            Location::HallC => 3,
        }
    }

    /// Decodes a stored code, failing on anything outside 1-3
    pub fn from_code(code: i64) -> SchemaResult<Self> {
        match code {
            1 => Ok(Location::HallA),
            2 => Ok(Location::HallB),
            3 => Ok(Location::HallC),
            other => Err(SchemaError::InvalidLocationCode(other)),
        }
    }

    /// Display label (the hall's short name)
    pub fn label(&self) -> &'static str {
        match self {
            Location::HallA => "Kins",
            Location::HallB => "J2",
            Location::HallC => "JCL",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A row exactly as it comes back from a partition table.
///
/// Codes are left undecoded; [`MenuRow::decode`] is where bad data is caught.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub recipe: String,
    pub date: NaiveDate,
    pub mealtime: i64,
    pub location: i64,
}

impl MenuRow {
    pub fn new(recipe: impl Into<String>, date: NaiveDate, mealtime: i64, location: i64) -> Self {
        Self {
            recipe: recipe.into(),
            date,
            mealtime,
            location,
        }
    }

    /// Decodes the mealtime and location codes into a typed entry.
    pub fn decode(&self) -> SchemaResult<MenuEntry> {
        Ok(MenuEntry {
            recipe: self.recipe.clone(),
            date: self.date,
            mealtime: Mealtime::from_code(self.mealtime)?,
            location: Location::from_code(self.location)?,
        })
    }
}

/// One served recipe (immutable once written)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub recipe: String,
    pub date: NaiveDate,
    pub mealtime: Mealtime,
    pub location: Location,
}

impl MenuEntry {
    pub fn new(
        recipe: impl Into<String>,
        date: NaiveDate,
        mealtime: Mealtime,
        location: Location,
    ) -> Self {
        Self {
            recipe: recipe.into(),
            date,
            mealtime,
            location,
        }
    }

    /// Converts back into the stored row form
    pub fn to_row(&self) -> MenuRow {
        MenuRow::new(
            self.recipe.clone(),
            self.date,
            self.mealtime.code(),
            self.location.code(),
        )
    }
}
