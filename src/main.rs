//! # optimize-data
//!
//! Command-line entry point. Reads one CSV file and writes a summary report
//! plus sample narratives to `data/optimized/` (or `--output-dir`).
//!
//! ```bash
//! optimize-data data/raw/trips.csv
//! optimize-data --seed 7 --limit 50000 data/raw/trips.csv
//! ```
//!
//! Exit status is 1 when no input is given or the input cannot be loaded.

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use clap::Parser as _;
use std::process::ExitCode;

#[expect(clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Logging is best effort; the run itself reports to stdout.
    if let Err(e) = data_optimizer::logging::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    cli::run(&cli)
}
