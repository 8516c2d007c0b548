use serde::{Deserialize, Serialize};

/// How a feature column resolves its default value from historical data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DefaultPolicy {
    /// Most frequent value; ties break to the smallest value.
    Mode,
    /// Interpolated median of the non-null values.
    Median,
    /// A fixed value, independent of the dataset.
    Constant(f64),
    /// Zero-fill, used for columns absent from the dataset.
    Zero,
}

/// A single named column in a predictor's feature schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub default: DefaultPolicy,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, default: DefaultPolicy) -> Self {
        Self { name: name.into(), default }
    }
}
