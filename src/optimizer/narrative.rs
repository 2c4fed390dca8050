//! Condensed per-row text for search ingestion.
//!
//! Each sampled row becomes one line such as
//! `id: T-1001 | name: Acme Freight | status: Delivered`. Only columns whose
//! names carry a [`PRIORITY_KEYWORDS`] entry are considered, and each field
//! is labelled by the last `_`-separated token of its column name.

use super::types::{Sample, SampleRule};
use super::values::{is_blank, render_value};
use crate::utils::truncate_chars;
use anyhow::Result;
use polars::prelude::*;

pub const PRIORITY_KEYWORDS: [&str; 12] = [
    "id",
    "trip",
    "indent",
    "transporter",
    "route",
    "status",
    "delay",
    "sla",
    "breach",
    "epod",
    "distance",
    "time",
];

pub const MAX_SELECTED_COLUMNS: usize = 8;
pub const MAX_FACTS: usize = 6;
pub const MAX_VALUE_CHARS: usize = 50;
pub const EMPTY_NARRATIVE: &str = "No data";

/// First [`MAX_SELECTED_COLUMNS`] column names containing a priority keyword.
pub fn select_priority_columns<S: AsRef<str>>(columns: &[S]) -> Vec<&str> {
    columns
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|name| {
            let lower = name.to_lowercase();
            PRIORITY_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .take(MAX_SELECTED_COLUMNS)
        .collect()
}

/// `trip_id` → `id`, `status` → `status`.
pub fn field_label(column: &str) -> &str {
    column.rsplit('_').next().unwrap_or(column)
}

/// Builds the narrative for row `row` of `df` from the `selected` columns.
///
/// # Errors
///
/// Returns an error if a selected column is missing or `row` is out of bounds.
pub fn narrate_row(df: &DataFrame, selected: &[&str], row: usize) -> Result<String> {
    let mut parts = Vec::with_capacity(MAX_FACTS);
    for &name in selected {
        let value = df.column(name)?.as_materialized_series().get(row)?;
        if is_blank(&value) {
            continue;
        }
        if let Some(text) = render_value(&value) {
            parts.push(format!(
                "{}: {}",
                field_label(name),
                truncate_chars(&text, MAX_VALUE_CHARS)
            ));
        }
        if parts.len() == MAX_FACTS {
            break;
        }
    }

    if parts.is_empty() {
        Ok(EMPTY_NARRATIVE.to_owned())
    } else {
        Ok(parts.join(" | "))
    }
}

/// One narrative per sampled row, in sample order. Logs progress every
/// `progress_interval` rows.
///
/// # Errors
///
/// Returns an error if a row cannot be read.
pub fn narrate_sample(sample: &Sample, progress_interval: usize) -> Result<Vec<String>> {
    let names: Vec<String> = sample
        .rows
        .get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    let selected = select_priority_columns(&names);
    tracing::debug!(rule = %sample.rule, columns = ?selected, "Narrative columns");

    let mut narratives = Vec::with_capacity(sample.len());
    for row in 0..sample.len() {
        narratives.push(narrate_row(&sample.rows, &selected, row)?);
        if progress_interval > 0 && narratives.len() % progress_interval == 0 {
            tracing::info!("Processed {} rows...", narratives.len());
        }
    }
    Ok(narratives)
}

/// Title line followed by the narratives, separated by blank lines.
pub fn render_sample_document(dataset: &str, rule: SampleRule, narratives: &[String]) -> String {
    let mut md = format!("# {dataset} - {}\n\n", rule.title());
    md.push_str(&narratives.join("\n\n"));
    md
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_label_takes_last_token() {
        assert_eq!(field_label("trip_id"), "id");
        assert_eq!(field_label("route_name_code"), "code");
        assert_eq!(field_label("status"), "status");
        assert_eq!(field_label("trailing_"), "");
    }

    #[test]
    fn test_selection_caps_at_eight() {
        let names: Vec<String> = (0..12).map(|i| format!("trip_{i}")).collect();
        let selected = select_priority_columns(&names);
        assert_eq!(selected.len(), MAX_SELECTED_COLUMNS);
        assert_eq!(selected.first().copied(), Some("trip_0"));
        assert_eq!(selected.last().copied(), Some("trip_7"));
    }

    #[test]
    fn test_render_sample_document() {
        let doc = render_sample_document(
            "trips",
            SampleRule::Delayed,
            &["id: 1".to_owned(), "id: 2".to_owned()],
        );
        assert_eq!(doc, "# trips - Delayed Trips\n\nid: 1\n\nid: 2");
    }
}
