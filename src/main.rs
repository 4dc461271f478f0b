//! menudb CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. The error envelope
//! is already on stdout when `run` fails; this only sets the exit code.

use menudb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
