//! JSON I/O for the CLI
//!
//! - input: JSON lines on stdin (ingest only)
//! - output: one JSON envelope on stdout
//!
//! Logs go to stderr, so stdout always parses as a single JSON value.

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;
use crate::ingest::MenuDay;

/// Reads menu days from stdin, one JSON object per line
pub fn read_menu_days() -> CliResult<Vec<MenuDay>> {
    let stdin = io::stdin();
    let days = MenuDay::read_json_lines(stdin.lock())?;
    Ok(days)
}

/// `{"status":"ok","data":...}`
pub fn ok_envelope(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// `{"status":"error","code":...,"message":...}`
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

pub fn write_response(data: Value) -> CliResult<()> {
    write_envelope(&ok_envelope(data))
}

pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_envelope(&error_envelope(code, message))
}

fn write_envelope(envelope: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, envelope)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
