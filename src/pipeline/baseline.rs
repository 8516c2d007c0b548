use polars::prelude::*;
use tracing::debug;

use crate::error::PipelineError;
use crate::scenario::columns;

/// How the baseline trend feature is resolved for a scenario.
///
/// This is a configuration property of the predictor variant, not a runtime
/// decision.
#[derive(Debug, Clone, PartialEq)]
pub enum BaselinePolicy {
    /// Mean of `column` over rows whose month matches the scenario month,
    /// falling back to the unconditioned mean when no rows match.
    MonthlyMean { column: String },
    /// A fixed demand level.
    Constant(f64),
}

impl BaselinePolicy {
    pub fn monthly_mean(column: impl Into<String>) -> Self {
        Self::MonthlyMean { column: column.into() }
    }

    /// Resolve the scalar trend level for `month`. An absent trend column
    /// zero-fills, consistent with default resolution.
    pub(crate) fn resolve(&self, history: &DataFrame, month: u32) -> Result<f64, PipelineError> {
        match self {
            Self::Constant(value) => Ok(*value),
            Self::MonthlyMean { column } => {
                if history.column(column).is_err() {
                    return Ok(0.0);
                }

                let matched = history
                    .clone()
                    .lazy()
                    .filter(col(columns::MONTH).eq(lit(month as i64)))
                    .collect()?;
                let frame = if matched.height() > 0 { matched } else { history.clone() };

                let trend = frame.column(column)?.cast(&DataType::Float64)?;
                let level = trend.f64()?.mean().unwrap_or(0.0);
                debug!(month, level, "resolved baseline trend");
                Ok(level)
            }
        }
    }
}
