use polars::prelude::*;

use crate::error::PipelineError;
use crate::schema::{DefaultPolicy, FeatureSchema};

/// Materialize a single-row frame of default values for every schema column.
///
/// Columns absent from `history` fall back to zero. Requesting mode/median
/// from an empty dataset is an [`PipelineError::EmptyHistoricalData`] error.
pub(crate) fn default_row(
    history: &DataFrame,
    schema: &FeatureSchema,
) -> Result<DataFrame, PipelineError> {
    let mut columns = Vec::with_capacity(schema.len());
    for spec in schema.columns() {
        let value = resolve_default(history, &spec.name, spec.default)?;
        columns.push(Column::new(spec.name.as_str().into(), vec![value]));
    }
    Ok(DataFrame::new(columns)?)
}

/// Resolve one column's default per its declared policy.
pub(crate) fn resolve_default(
    history: &DataFrame,
    name: &str,
    policy: DefaultPolicy,
) -> Result<f64, PipelineError> {
    match policy {
        DefaultPolicy::Constant(value) => Ok(value),
        DefaultPolicy::Zero => Ok(0.0),
        DefaultPolicy::Mode | DefaultPolicy::Median => {
            if history.height() == 0 {
                return Err(PipelineError::EmptyHistoricalData);
            }
            let Ok(column) = history.column(name) else {
                return Ok(0.0);
            };
            let column = column.cast(&DataType::Float64)?;
            let ca = column.f64()?;
            let stat = match policy {
                DefaultPolicy::Median => median(ca),
                _ => mode(ca),
            };
            Ok(stat.unwrap_or(0.0))
        }
    }
}

/// Most frequent non-null value; ties break to the smallest value.
fn mode(ca: &Float64Chunked) -> Option<f64> {
    let mut values: Vec<f64> = ca.into_iter().flatten().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let (mut best, mut best_len) = (values[0], 0usize);
    let (mut run, mut run_len) = (values[0], 0usize);
    for &value in &values {
        if value == run {
            run_len += 1;
        } else {
            run = value;
            run_len = 1;
        }
        if run_len > best_len {
            best = run;
            best_len = run_len;
        }
    }
    Some(best)
}

/// Interpolated median of the non-null values.
fn median(ca: &Float64Chunked) -> Option<f64> {
    let mut values: Vec<f64> = ca.into_iter().flatten().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    Some(if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    })
}
