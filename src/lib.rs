//! menudb - dining-hall menu history over monthly partitioned tables
//!
//! Search path: filters → planner → store → repository views.
//! Write path: ingest.

pub mod cli;
pub mod config;
pub mod filters;
pub mod ingest;
pub mod observability;
pub mod partition;
pub mod planner;
pub mod repository;
pub mod schema;
pub mod store;
