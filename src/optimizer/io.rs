use crate::error::OptimizerError;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Reads a header-first CSV file into memory.
///
/// Column types are inferred from the whole file rather than a prefix, so a
/// column that only turns out to be text far down the file is still read as
/// text instead of failing the parse.
///
/// # Errors
///
/// Returns an error if the path is not a file or Polars cannot parse it
/// (malformed rows, invalid UTF-8).
pub fn load_table(path: &Path, row_limit: Option<usize>) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(OptimizerError::InvalidPath(format!(
            "{} does not exist or is not a file",
            path.display()
        ))
        .into());
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_n_rows(row_limit)
        .finish()
        .map_err(OptimizerError::from)
        .context("Failed to scan CSV")?
        .collect()
        .map_err(OptimizerError::from)
        .context("Failed to read CSV")?;

    tracing::info!(
        "Loaded {}: {} rows, {} columns",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Input base name without extension, used to name every output file.
///
/// # Errors
///
/// Returns an error if the path has no usable file stem.
pub fn dataset_name(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| OptimizerError::InvalidPath(format!("{} has no file name", path.display())))
        .map_err(Into::into)
}

/// Writes `content` to `<output_dir>/<dataset>_<suffix>.md` and returns the
/// path and byte count.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_output(
    output_dir: &Path,
    dataset: &str,
    suffix: &str,
    content: &str,
) -> Result<(PathBuf, u64)> {
    let path = output_dir.join(format!("{dataset}_{suffix}.md"));
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok((path, content.len() as u64))
}
