use super::columns::{ColumnRole, ColumnRoles};
use super::types::ValueFrequency;
use super::values::render_value;
use crate::utils::{fmt_count, percentage};
use anyhow::Result;
use polars::prelude::*;

const TOP_N: usize = 10;
const MAX_SLA_SECTIONS: usize = 2;
const MAX_FLAG_DISTINCT: usize = 10;

const COUNT_COL: &str = "__count";
const FIRST_SEEN_COL: &str = "__first_seen";

/// Non-null value counts, most frequent first, keeping at most `top` entries.
/// Ties keep the order in which values first appear.
///
/// # Errors
///
/// Returns an error if the grouping fails or a value cannot be read back.
pub fn value_frequencies(series: &Series, top: Option<usize>) -> Result<Vec<ValueFrequency>> {
    let name = series.name().clone();
    let counted = DataFrame::new(vec![series.drop_nulls().into_column()])?
        .lazy()
        .with_row_index(FIRST_SEEN_COL, None)
        .group_by([col(name.clone())])
        .agg([len().alias(COUNT_COL), col(FIRST_SEEN_COL).min()])
        .sort_by_exprs(
            [col(COUNT_COL), col(FIRST_SEEN_COL)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;
    let counted = match top {
        Some(n) => counted.head(Some(n)),
        None => counted,
    };

    let values = counted.column(name.as_str())?.as_materialized_series();
    let counts = counted.column(COUNT_COL)?.cast(&DataType::UInt64)?;
    let mut freqs = Vec::with_capacity(counted.height());
    for (i, count) in counts.as_materialized_series().u64()?.into_iter().enumerate() {
        let Some(value) = render_value(&values.get(i)?) else {
            continue;
        };
        freqs.push(ValueFrequency {
            value,
            count: count.unwrap_or_default() as usize,
        });
    }
    Ok(freqs)
}

/// Boolean columns always qualify; anything else needs fewer than ten
/// distinct non-null values.
fn is_flag_like(series: &Series) -> Result<bool> {
    if series.dtype().is_bool() {
        return Ok(true);
    }
    Ok(series.drop_nulls().n_unique()? < MAX_FLAG_DISTINCT)
}

fn push_frequency_lines(md: &mut String, freqs: &[ValueFrequency], total: usize, unit: &str) {
    for freq in freqs {
        md.push_str(&format!(
            "- {}: {}{unit} ({:.1}%)\n",
            freq.value,
            fmt_count(freq.count),
            percentage(freq.count, total)
        ));
    }
    md.push('\n');
}

/// Renders the markdown statistics report for `df`.
///
/// Sections appear in a fixed order and each is emitted only when a column
/// with the matching role exists:
/// status distribution, SLA/breach flags, top transporters, top routes.
///
/// # Errors
///
/// Returns an error if a matched column cannot be read.
pub fn generate_summary_stats(
    df: &DataFrame,
    dataset_name: &str,
    roles: &ColumnRoles,
) -> Result<String> {
    let total = df.height();
    let mut md = format!("# {dataset_name} - Summary Statistics\n\n");
    md.push_str(&format!("**Total Records:** {}\n\n", fmt_count(total)));

    if let Some(name) = roles.first(ColumnRole::Status) {
        let series = df.column(name)?.as_materialized_series();
        let freqs = value_frequencies(series, Some(TOP_N))?;
        md.push_str(&format!("## {name} Distribution\n"));
        push_frequency_lines(&mut md, &freqs, total, "");
    }

    for name in roles.columns(ColumnRole::SlaMetric).iter().take(MAX_SLA_SECTIONS) {
        let series = df.column(name)?.as_materialized_series();
        if !is_flag_like(series)? {
            tracing::debug!("Skipping {name}: too many distinct values for a flag section");
            continue;
        }
        let freqs = value_frequencies(series, None)?;
        md.push_str(&format!("## {name}\n"));
        push_frequency_lines(&mut md, &freqs, total, "");
    }

    if let Some(name) = roles.first(ColumnRole::TransporterName) {
        let series = df.column(name)?.as_materialized_series();
        let freqs = value_frequencies(series, Some(TOP_N))?;
        md.push_str("## Top 10 Transporters\n");
        push_frequency_lines(&mut md, &freqs, total, " trips");
    }

    if let Some(name) = roles.first(ColumnRole::Route) {
        let series = df.column(name)?.as_materialized_series();
        let freqs = value_frequencies(series, Some(TOP_N))?;
        md.push_str("## Top 10 Routes\n");
        push_frequency_lines(&mut md, &freqs, total, " trips");
    }

    Ok(md)
}
