//! CLI command implementations
//!
//! Every command loads the config, applies its log level, does one thing
//! and returns a JSON value. `run_command` wraps the value (or the error)
//! in the output envelope.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::Config;
use crate::ingest::{MenuDay, MenuIngestor};
use crate::observability::{Logger, ObservationScope};
use crate::partition::PartitionKey;
use crate::repository::{Clock, MenuRepository, SearchRequest, SystemClock};
use crate::store::{MenuWriter, SqliteConnectionFactory, SqliteStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_menu_days, write_error, write_response};

/// Main CLI entry point.
///
/// The only function main.rs calls.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Runs one command and writes its envelope to stdout
pub fn run_command(cmd: Command) -> CliResult<()> {
    match execute(cmd) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code(), e.message())?;
            Err(e)
        }
    }
}

/// Runs one command and returns its payload
pub fn execute(cmd: Command) -> CliResult<Value> {
    match cmd {
        Command::Init { config } => init(&load_config(&config)?),
        Command::Search {
            config,
            food,
            filters,
        } => search(
            &load_config(&config)?,
            &SearchRequest::summary(food, filters.as_deref()),
        ),
        Command::Details {
            config,
            food,
            filters,
        } => details(
            &load_config(&config)?,
            &SearchRequest::detail(food, filters.as_deref()),
        ),
        Command::Explain {
            config,
            food,
            filters,
            detail,
        } => {
            let request = if detail {
                SearchRequest::detail(food, filters.as_deref())
            } else {
                SearchRequest::summary(food, filters.as_deref())
            };
            explain(&load_config(&config)?, &request)
        }
        Command::Ingest { config } => {
            let config = load_config(&config)?;
            let days = read_menu_days()?;
            ingest(&config, &days)
        }
        Command::Partitions { config } => partitions(&load_config(&config)?),
    }
}

/// Loads and validates the config, then applies its log level
pub fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    Logger::set_min_severity(config.log_severity()?);
    Ok(config)
}

fn repository(config: &Config) -> CliResult<MenuRepository<SqliteConnectionFactory>> {
    Ok(MenuRepository::new(
        config.connection_factory(),
        config.locator()?,
        config.planner_config()?,
    ))
}

/// Creates the database with the epoch and current-month partitions.
///
/// Refuses to touch an existing database file.
pub fn init(config: &Config) -> CliResult<Value> {
    let path = config.database_path();
    if path.exists() {
        return Err(CliError::already_initialized(path));
    }

    let scope =
        ObservationScope::with_fields("MENU_INIT", &[("path", config.database_path.as_str())]);
    let locator = config.locator()?;
    let mut store = SqliteStore::create(path, config.connect_timeout())?;

    let mut tables = vec![locator.table_name(config.epoch_key()?)];
    let current = locator.table_name(PartitionKey::of(SystemClock.today()));
    if !tables.contains(&current) {
        tables.push(current);
    }
    for table in &tables {
        store.create_partition(table)?;
    }

    scope.complete_with_fields(&[("partitions", tables.join(",").as_str())]);
    Ok(json!({
        "database": config.database_path,
        "partitions": tables,
    }))
}

pub fn search(config: &Config, request: &SearchRequest) -> CliResult<Value> {
    let rows = repository(config)?.load_summary(request)?;
    Ok(serde_json::to_value(rows)?)
}

pub fn details(config: &Config, request: &SearchRequest) -> CliResult<Value> {
    let rows = repository(config)?.load_detail(request)?;
    Ok(serde_json::to_value(rows)?)
}

pub fn explain(config: &Config, request: &SearchRequest) -> CliResult<Value> {
    let plan = repository(config)?.explain(request)?;
    let mut value = serde_json::to_value(&plan)?;
    value["text"] = Value::String(plan.to_string());
    Ok(value)
}

/// Writes a batch of menu days, creating the database if needed
pub fn ingest(config: &Config, days: &[MenuDay]) -> CliResult<Value> {
    let locator = config.locator()?;
    let mut store = config.connection_factory().connect_writer()?;
    let report = MenuIngestor::new(&mut store, &locator).ingest(days)?;
    Ok(serde_json::to_value(report)?)
}

pub fn partitions(config: &Config) -> CliResult<Value> {
    let repository = repository(config)?;
    let keys = repository.partitions()?;
    let locator = repository.locator();
    let listed: Vec<Value> = keys
        .iter()
        .map(|key| {
            json!({
                "table": locator.table_name(*key),
                "month": key.to_string(),
            })
        })
        .collect();
    Ok(Value::Array(listed))
}
