use super::baseline::BaselinePolicy;
use crate::scenario::columns;
use crate::schema::{DefaultPolicy, FlagGroup};

/// Shape of the reshaped prediction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    /// Unpivot one wide output vector into (hex_id, value) rows.
    PerHex,
    /// One predicted scalar per hour of a 24-row day template.
    PerHour,
}

/// Per-variant wiring of the scenario pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Default-resolution policy for columns the scenario does not override.
    pub defaults: DefaultPolicy,
    pub baseline: BaselinePolicy,
    /// One-hot event flags, if the variant carries them.
    pub flags: Option<FlagGroup>,
    pub output: OutputShape,
}

impl PipelineConfig {
    /// Customer-demand variant: mode defaults, month-conditioned baseline,
    /// per-hex output.
    pub fn customer_demand() -> Self {
        Self {
            defaults: DefaultPolicy::Mode,
            baseline: BaselinePolicy::monthly_mean(columns::BASELINE),
            flags: Some(FlagGroup::teams()),
            output: OutputShape::PerHex,
        }
    }

    /// Operational net-flow variant: median defaults, fixed baseline level,
    /// per-hex output.
    pub fn net_flow() -> Self {
        Self {
            defaults: DefaultPolicy::Median,
            baseline: BaselinePolicy::Constant(1000.0),
            flags: Some(FlagGroup::teams()),
            output: OutputShape::PerHex,
        }
    }
}
