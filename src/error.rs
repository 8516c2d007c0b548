use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors surfaced by the scenario prediction pipeline.
///
/// All variants are unrecoverable at the pipeline level and propagate to the
/// caller; a deterministic computation has nothing to retry.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The predictor's required columns could not all be resolved.
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Mode/median defaults were requested from a dataset with no rows.
    #[error("historical dataset has no rows to compute defaults from")]
    EmptyHistoricalData,

    /// The underlying inference call failed.
    #[error("predictor failure: {0}")]
    PredictorFailure(String),

    /// Dataframe-layer failure while assembling scenario rows.
    #[error(transparent)]
    Frame(#[from] PolarsError),
}
