//! Ingestion path for scraped menus
//!
//! The only writer of partition tables. Input is a batch of [`MenuDay`]s,
//! usually read as JSON lines.

mod errors;
mod ingestor;
mod types;

pub use errors::{IngestError, IngestResult};
pub use ingestor::{IngestReport, MenuIngestor};
pub use types::{clean_recipe, MealMenu, MenuDay};
