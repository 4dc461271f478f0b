//! CLI argument definitions using clap
//!
//! Commands:
//! - menudb init --config <path>
//! - menudb search <food> [--filters 0111111]
//! - menudb details <food> [--filters 2111111]
//! - menudb explain <food> [--filters ...] [--detail]
//! - menudb ingest --config <path> < days.jsonl
//! - menudb partitions --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dining-hall menu history search
#[derive(Parser, Debug)]
#[command(name = "menudb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and its first partitions
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./menudb.json")]
        config: PathBuf,
    },

    /// Search recipes by word start (listing view)
    Search {
        #[arg(long, default_value = "./menudb.json")]
        config: PathBuf,

        /// Food name to look for
        food: String,

        /// 7-digit filter string
        #[arg(long)]
        filters: Option<String>,
    },

    /// Show every serving of one recipe (detail view)
    Details {
        #[arg(long, default_value = "./menudb.json")]
        config: PathBuf,

        /// Exact recipe name
        food: String,

        #[arg(long)]
        filters: Option<String>,
    },

    /// Print the query plan for a search without running it
    Explain {
        #[arg(long, default_value = "./menudb.json")]
        config: PathBuf,

        food: String,

        #[arg(long)]
        filters: Option<String>,

        /// Plan the detail view instead of the listing view
        #[arg(long)]
        detail: bool,
    },

    /// Write menu days read as JSON lines from stdin
    Ingest {
        #[arg(long, default_value = "./menudb.json")]
        config: PathBuf,
    },

    /// List existing monthly partitions
    Partitions {
        #[arg(long, default_value = "./menudb.json")]
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
