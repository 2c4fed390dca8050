#![expect(clippy::print_stdout, clippy::print_stderr)]

use anyhow::Result;
use clap::{CommandFactory as _, Parser};
use data_optimizer::config::OptimizerConfig;
use data_optimizer::optimizer::{OptimizeReport, optimize_file_flow};
use data_optimizer::utils::fmt_bytes;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "optimize-data",
    version,
    about = "Sample a trip dataset into narratives and summary statistics for file search"
)]
pub struct Cli {
    /// CSV file to optimize
    pub input: Option<PathBuf>,

    /// Directory for the generated markdown files
    #[arg(short, long, env = "OPTIMIZER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only read the first N rows of the input
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log debug details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Defaults, overlaid by the config file, overlaid by flags.
    pub fn resolve_config(&self) -> Result<OptimizerConfig> {
        let mut config = match &self.config {
            Some(path) => OptimizerConfig::load(path)?,
            None => OptimizerConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if self.limit.is_some() {
            config.row_limit = self.limit;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

pub fn run(cli: &Cli) -> ExitCode {
    let Some(input) = &cli.input else {
        println!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    };

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    println!("\nSmart Data Optimizer");
    println!("Input: {}", input.display());
    println!("Output: {}/\n", config.output_dir.display());

    match optimize_file_flow(input, &config) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &OptimizeReport) {
    println!();
    for skipped in &report.skipped {
        println!("  Skipped {}: {}", skipped.rule, skipped.reason);
    }
    for file in &report.files {
        match file.records {
            Some(records) => println!(
                "  Created: {} ({}, {records} records)",
                file.path.display(),
                fmt_bytes(file.bytes)
            ),
            None => println!(
                "  Created: {} ({})",
                file.path.display(),
                fmt_bytes(file.bytes)
            ),
        }
    }
    println!(
        "\nOptimization complete! Files in: {}",
        report.output_dir.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() -> Result<()> {
        let cli = Cli::try_parse_from([
            "optimize-data",
            "trips.csv",
            "--output-dir",
            "out",
            "--seed",
            "42",
            "--limit",
            "100",
        ])?;
        let config = cli.resolve_config()?;
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.row_limit, Some(100));
        Ok(())
    }

    #[test]
    fn test_input_is_optional_at_parse_time() -> Result<()> {
        let cli = Cli::try_parse_from(["optimize-data"])?;
        assert!(cli.input.is_none());
        Ok(())
    }

    fn assert_failure(code: ExitCode) {
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn test_missing_input_exits_with_failure() -> Result<()> {
        let cli = Cli::try_parse_from(["optimize-data"])?;
        assert_failure(run(&cli));
        Ok(())
    }

    #[test]
    fn test_unloadable_input_exits_with_failure() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("optimized");
        let missing = dir.path().join("missing.csv");
        let cli = Cli::try_parse_from([
            OsStr::new("optimize-data"),
            missing.as_os_str(),
            OsStr::new("--output-dir"),
            out.as_os_str(),
        ])?;

        assert_failure(run(&cli));
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn test_loadable_input_exits_with_success() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("optimized");
        let cli = Cli::try_parse_from([
            OsStr::new("optimize-data"),
            OsStr::new("testdata/trips_small.csv"),
            OsStr::new("--output-dir"),
            out.as_os_str(),
        ])?;

        assert_eq!(format!("{:?}", run(&cli)), format!("{:?}", ExitCode::SUCCESS));
        assert!(out.join("trips_small_summary.md").exists());
        Ok(())
    }
}
