//! Menu schema
//!
//! Row types shared by the store, the planner and the repository, plus the
//! fixed code tables for mealtimes and locations.

mod errors;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use types::{
    Location, Mealtime, MenuEntry, MenuRow, COL_DATE, COL_LOCATION, COL_MEALTIME, COL_RECIPE,
    RECIPE_MAX_LEN,
};
