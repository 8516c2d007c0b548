mod gbt;

pub use gbt::{GbtModel, GbtTarget, Tree};

use polars::frame::DataFrame;

use crate::error::PipelineError;

/// An opaque trained predictor over a fixed, named feature schema.
///
/// Implementations are loaded once at startup and treated as immutable for
/// the process lifetime; prediction must be deterministic and side-effect
/// free.
pub trait Predictor {
    /// Feature columns, in the order the model was trained on.
    fn feature_names(&self) -> &[String];

    /// Output columns: one per hex cell for spatial models, or a single
    /// series target for temporal models.
    fn target_names(&self) -> &[String];

    /// Predict one output vector per input row. `batch` must contain every
    /// feature column.
    fn predict(&self, batch: &DataFrame) -> Result<Vec<Vec<f64>>, PipelineError>;
}
