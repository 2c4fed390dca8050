//! Error types for the optimizer.
//!
//! Two tiers exist in practice:
//!
//! - Loading failures are fatal. They surface from
//!   [`crate::optimizer::optimize_file_flow`] as an `anyhow::Error` whose root
//!   cause is an [`OptimizerError`], and the binary exits with status 1.
//! - Sampling failures are local. Each rule returns an [`OptimizerError`]
//!   describing why it was skipped, and the run carries on.
//!
//! ```
//! use data_optimizer::error::OptimizerError;
//!
//! let err = OptimizerError::MissingColumn("exception/reject".to_owned());
//! assert_eq!(err.to_string(), "No exception/reject column found");
//! ```

use std::fmt;

/// Main error type for optimizer operations.
#[derive(Debug)]
pub enum OptimizerError {
    /// I/O errors (reading the input, writing outputs)
    Io(std::io::Error),

    /// Data processing errors (Polars parsing, filtering, sampling)
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// Input file not found or not a regular file
    InvalidPath(String),

    /// No column matched the keywords a rule depends on
    MissingColumn(String),

    /// A filter left no rows to sample from
    EmptySelection(String),
}

impl fmt::Display for OptimizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::MissingColumn(role) => write!(f, "No {role} column found"),
            Self::EmptySelection(what) => write!(f, "No rows matched the {what} filter"),
        }
    }
}

impl std::error::Error for OptimizerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OptimizerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for OptimizerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for OptimizerError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizerError>;
