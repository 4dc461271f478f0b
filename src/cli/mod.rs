//! CLI module for menudb
//!
//! - init: create the database and its first partitions
//! - search / details: run a search, print rows
//! - explain: print the query plan
//! - ingest: write scraped menu days from stdin
//! - partitions: list monthly partitions

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    details, execute, explain, ingest, init, load_config, partitions, run, run_command, search,
};
pub use errors::{CliError, CliResult};
pub use io::{error_envelope, ok_envelope, write_error, write_response};
