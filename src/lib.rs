#![doc = "Hexcast public API"]
mod analytics;
mod error;
mod pipeline;
mod predictor;
mod render;
mod scenario;
mod schema;
mod store;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use error::PipelineError;

#[doc(inline)]
pub use schema::{ColumnSpec, DefaultPolicy, FeatureSchema, FlagGroup};

#[doc(inline)]
pub use scenario::{DayScenario, ScenarioInputs, WindowWeather, columns};

#[doc(inline)]
pub use store::HistoricalData;

#[doc(inline)]
pub use predictor::{GbtModel, GbtTarget, Predictor, Tree};

#[doc(inline)]
pub use pipeline::{
    BaselinePolicy, HexPrediction, HourPrediction, OutputShape, PipelineConfig, PredictionOutput,
    build_day_forecast, build_scenario_predictions,
};

#[doc(inline)]
pub use render::{NEUTRAL, Rgba, color_batch, demand_color, elevation, net_flow_color};

#[doc(inline)]
pub use analytics::{
    ForecastAccuracy, TripBreakdown, forecast_accuracy, large_misses, monthly_totals,
    trip_breakdown, usage_matrix,
};
