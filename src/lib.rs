//! # data-optimizer
//!
//! Turns a large trip dataset into a handful of small text files suited to
//! text-search ingestion:
//!
//! - `<name>_summary.md` with status, SLA, transporter and route distributions
//! - up to three sample files (`normal_trips`, `delayed_trips`,
//!   `exception_cases`) holding one condensed narrative line per sampled row
//!
//! Columns are located by case-insensitive keyword matching on their names,
//! so no schema has to be declared up front. See [`optimizer::columns`] for
//! the keyword table.
//!
//! ```no_run
//! use data_optimizer::config::OptimizerConfig;
//! use data_optimizer::optimizer::optimize_file_flow;
//!
//! let report = optimize_file_flow("trips.csv".as_ref(), &OptimizerConfig::default())?;
//! println!("{} files written", report.files.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod logging;
pub mod optimizer;
pub mod utils;
