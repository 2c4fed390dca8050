use super::columns::ColumnRoles;
use super::io::{dataset_name, load_table, write_output};
use super::narrative::{narrate_sample, render_sample_document};
use super::sampling::Sampler;
use super::summary::generate_summary_stats;
use super::types::{OptimizeReport, SampleOutcome, SkippedRule, WrittenFile};
use crate::config::OptimizerConfig;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Runs the whole pipeline for one input file.
///
/// Load → summary report → sampling → narratives. A load failure aborts
/// before anything is written; sampling rules that cannot run are recorded
/// in [`OptimizeReport::skipped`] and do not stop the run.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded, the output directory
/// cannot be created, or an output file cannot be written.
pub fn optimize_file_flow(input: &Path, config: &OptimizerConfig) -> Result<OptimizeReport> {
    config.validate()?;

    let dataset = dataset_name(input)?;
    let df = load_table(input, config.row_limit)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let names: Vec<String> = df
        .get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    let roles = ColumnRoles::classify(&names);
    for (role, columns) in roles.detected() {
        tracing::debug!(?role, ?columns, "Detected column role");
    }

    let mut report = OptimizeReport {
        dataset_name: dataset.clone(),
        row_count: df.height(),
        column_count: df.width(),
        output_dir: config.output_dir.clone(),
        files: Vec::new(),
        skipped: Vec::new(),
    };

    tracing::info!("Generating summary statistics...");
    let summary_md = generate_summary_stats(&df, &dataset, &roles)
        .context("Failed to generate summary statistics")?;
    let (path, bytes) = write_output(&config.output_dir, &dataset, "summary", &summary_md)?;
    tracing::info!("Created: {} ({bytes} bytes)", path.display());
    report.files.push(WrittenFile {
        path,
        bytes,
        records: None,
    });

    tracing::info!("Performing smart sampling...");
    let sampler = Sampler::new(config.caps, config.seed);
    for outcome in sampler.run(&df, &roles) {
        let sample = match outcome {
            SampleOutcome::Sampled(sample) => sample,
            SampleOutcome::Skipped { rule, reason } => {
                report.skipped.push(SkippedRule {
                    rule,
                    reason: reason.to_string(),
                });
                continue;
            }
        };

        tracing::info!("Converting {} to narratives...", sample.rule);
        let narratives = narrate_sample(&sample, config.progress_interval)
            .with_context(|| format!("Failed to build narratives for {}", sample.rule))?;
        let document = render_sample_document(&dataset, sample.rule, &narratives);
        let (path, bytes) =
            write_output(&config.output_dir, &dataset, sample.rule.label(), &document)?;
        tracing::info!(
            "Created: {} ({bytes} bytes, {} records)",
            path.display(),
            narratives.len()
        );
        report.files.push(WrittenFile {
            path,
            bytes,
            records: Some(narratives.len()),
        });
    }

    Ok(report)
}
