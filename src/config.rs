use crate::error::{OptimizerError, Result};
use crate::utils::DATA_OPTIMIZED_DIR;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Upper bounds on how many rows each sampling rule may draw.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SampleCaps {
    pub normal: usize,
    pub delayed: usize,
    pub exception: usize,
}

impl Default for SampleCaps {
    fn default() -> Self {
        Self {
            normal: 1000,
            delayed: 5000,
            exception: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Directory the summary and sample files are written to
    pub output_dir: PathBuf,
    /// Only read the first N data rows of the input
    pub row_limit: Option<usize>,
    /// Fixed seed for sampling. Unset means a fresh random draw every run.
    pub seed: Option<u64>,
    pub caps: SampleCaps,
    /// Log a progress line every N narratives
    pub progress_interval: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DATA_OPTIMIZED_DIR),
            row_limit: None,
            seed: None,
            caps: SampleCaps::default(),
            progress_interval: 500,
        }
    }
}

impl OptimizerConfig {
    /// Reads a JSON config file. Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// sets `progress_interval` to zero.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OptimizerError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if `progress_interval` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.progress_interval == 0 {
            return Err(OptimizerError::Config(
                "progress_interval must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}
