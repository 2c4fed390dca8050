//! Representative row subsets.
//!
//! Three independent rules pull rows out of the loaded table:
//!
//! | Rule        | Filter                                                     | Cap  |
//! |-------------|------------------------------------------------------------|------|
//! | `Normal`    | every breach flag column is null, false or `"FALSE"`       | 1000 |
//! | `Delayed`   | every breach flag column is true or `"TRUE"`               | 5000 |
//! | `Exception` | the first exception/reject column is non-null              | 1000 |
//!
//! Breach flag filters are applied one column after another, each narrowing
//! the rows left by the previous one. A rule that cannot run, or that leaves
//! nothing to sample, produces [`SampleOutcome::Skipped`] instead of failing
//! the whole run.
//!
//! Draws are uniform without replacement and shuffled. Without a seed they
//! differ from run to run.

use super::columns::{ColumnRole, ColumnRoles};
use super::types::{Sample, SampleOutcome, SampleRule};
use crate::config::SampleCaps;
use crate::error::{OptimizerError, Result};
use polars::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FlagState {
    Clear,
    Breached,
}

/// Predicate selecting rows whose flag column is in `state`.
///
/// The comparison depends on how the column was inferred: boolean columns
/// are tested directly, text columns against the literals `FALSE`/`TRUE`,
/// and numeric columns against 0/1. Nulls always count as clear.
fn flag_predicate(name: &str, dtype: &DataType, state: FlagState) -> Expr {
    let column = col(name);
    let matches_state = match (dtype, state) {
        (DataType::Boolean, FlagState::Clear) => column.clone().not(),
        (DataType::Boolean, FlagState::Breached) => column.clone(),
        (DataType::String, FlagState::Clear) => column.clone().eq(lit("FALSE")),
        (DataType::String, FlagState::Breached) => column.clone().eq(lit("TRUE")),
        (dt, FlagState::Clear) if dt.is_primitive_numeric() => column.clone().eq(lit(0)),
        (dt, FlagState::Breached) if dt.is_primitive_numeric() => column.clone().eq(lit(1)),
        _ => lit(false),
    }
    .fill_null(lit(false));

    match state {
        FlagState::Clear => column.is_null().or(matches_state),
        FlagState::Breached => matches_state,
    }
}

/// Filters `df` down to rows where every breach flag column is in `state`.
fn filter_by_flags(df: &DataFrame, flag_columns: &[String], state: FlagState) -> Result<DataFrame> {
    let mut lf = df.clone().lazy();
    for name in flag_columns {
        let dtype = df.column(name)?.dtype();
        lf = lf.filter(flag_predicate(name, dtype, state));
    }
    Ok(lf.collect()?)
}

#[derive(Clone, Debug, Default)]
pub struct Sampler {
    caps: SampleCaps,
    seed: Option<u64>,
}

impl Sampler {
    pub fn new(caps: SampleCaps, seed: Option<u64>) -> Self {
        Self { caps, seed }
    }

    /// Runs every rule in order. Failures are logged and reported as skips.
    pub fn run(&self, df: &DataFrame, roles: &ColumnRoles) -> Vec<SampleOutcome> {
        tracing::debug!(
            breach_flags = ?roles.columns(ColumnRole::BreachFlag),
            delay = ?roles.columns(ColumnRole::Delay),
            exception = ?roles.columns(ColumnRole::Exception),
            "Sampling columns"
        );
        SampleRule::ALL
            .into_iter()
            .map(|rule| match self.sample(rule, df, roles) {
                Ok(sample) => {
                    tracing::info!("Sampled {} {}", sample.len(), rule.title().to_lowercase());
                    SampleOutcome::Sampled(sample)
                }
                Err(reason) => {
                    tracing::warn!("{} sampling skipped: {reason}", rule.title());
                    SampleOutcome::Skipped { rule, reason }
                }
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`OptimizerError::MissingColumn`] if the rule needs a column
    /// the table lacks, [`OptimizerError::EmptySelection`] if no rows qualify,
    /// or a processing error from Polars.
    pub fn sample(&self, rule: SampleRule, df: &DataFrame, roles: &ColumnRoles) -> Result<Sample> {
        let filtered = match rule {
            SampleRule::Normal => {
                filter_by_flags(df, roles.columns(ColumnRole::BreachFlag), FlagState::Clear)?
            }
            SampleRule::Delayed => {
                filter_by_flags(df, roles.columns(ColumnRole::BreachFlag), FlagState::Breached)?
            }
            SampleRule::Exception => {
                let name = roles
                    .first(ColumnRole::Exception)
                    .ok_or_else(|| OptimizerError::MissingColumn("exception/reject".to_owned()))?;
                df.clone().lazy().filter(col(name).is_not_null()).collect()?
            }
        };

        if filtered.height() == 0 {
            return Err(OptimizerError::EmptySelection(rule.label().to_owned()));
        }

        let n = rule.cap(&self.caps).min(filtered.height());
        if n == 0 {
            return Err(OptimizerError::Config(format!("sample cap for {rule} is zero")));
        }
        let rows = filtered.sample_n_literal(n, false, true, self.seed)?;
        Ok(Sample { rule, rows })
    }
}
