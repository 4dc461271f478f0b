//! Table locator subsystem
//!
//! Menu rows are sharded into one table per calendar month. This module
//! names those tables, does the month arithmetic around them, and answers
//! whether a given partition exists.
//!
//! Partitions are created lazily by the ingestion path, so a missing table
//! is a normal condition meaning "no rows yet".

mod catalog;
mod errors;
mod locator;

pub use catalog::{PartitionCatalog, StaticCatalog};
pub use errors::{PartitionError, PartitionResult};
pub use locator::{is_identifier, month_range, next_month, PartitionKey, TableLocator};
