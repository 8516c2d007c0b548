mod baseline;
mod config;
mod defaults;
mod output;

pub use baseline::BaselinePolicy;
pub use config::{OutputShape, PipelineConfig};
pub use output::{HexPrediction, HourPrediction, PredictionOutput};

use polars::prelude::*;
use tracing::debug;

use crate::error::PipelineError;
use crate::predictor::Predictor;
use crate::scenario::{DayScenario, ScenarioInputs, WindowWeather, columns};
use crate::schema::{DefaultPolicy, FeatureSchema};
use crate::store::HistoricalData;

/// Baseline demand level injected into every row of the day template.
const DAY_BASELINE: f64 = 3000.0;

/// Build one complete feature row from a partial scenario, predict, and
/// reshape into a long-format table.
///
/// Deterministic given identical inputs, history snapshot, and predictor
/// state; reads `history` without mutating it.
pub fn build_scenario_predictions(
    inputs: &ScenarioInputs,
    history: &HistoricalData,
    predictor: &dyn Predictor,
    config: &PipelineConfig,
    flag_choice: Option<&str>,
) -> Result<PredictionOutput, PipelineError> {
    let schema = scenario_schema(predictor, config);
    let mut frame = defaults::default_row(history.frame(), &schema)?;

    // Scenario overrides strictly replace the materialized defaults.
    for (name, value) in inputs.overrides() {
        frame.with_column(Series::new(name.into(), vec![value]))?;
    }

    let level = config.baseline.resolve(history.frame(), inputs.month)?;
    frame.with_column(Series::new(columns::BASELINE.into(), vec![level]))?;

    if let Some(flags) = &config.flags {
        flags.apply(&mut frame, flag_choice)?;
    }

    let aligned = schema.align(&frame)?;
    debug!(cols = aligned.width(), "scenario row ready");

    let outputs = predictor.predict(&aligned)?;
    match config.output {
        OutputShape::PerHex => output::unpivot_per_hex(&outputs, predictor.target_names()),
        OutputShape::PerHour => output::per_hour(&outputs),
    }
}

/// Build a 24-row day template with a 3-hour weather perturbation, predict,
/// and keep one scalar per hour.
pub fn build_day_forecast(
    scenario: &DayScenario,
    history: &HistoricalData,
    predictor: &dyn Predictor,
) -> Result<PredictionOutput, PipelineError> {
    let frame = day_template(scenario, history, predictor)?;

    let schema =
        FeatureSchema::with_policy(predictor.feature_names().iter().cloned(), DefaultPolicy::Mode);
    let aligned = schema.align(&frame)?;
    debug!(rows = aligned.height(), cols = aligned.width(), "day template ready");

    let outputs = predictor.predict(&aligned)?;
    output::per_hour(&outputs)
}

/// Schema for the single-row variants: the predictor's columns under the
/// configured default policy, with flag columns zero-filled.
fn scenario_schema(predictor: &dyn Predictor, config: &PipelineConfig) -> FeatureSchema {
    let mut schema =
        FeatureSchema::with_policy(predictor.feature_names().iter().cloned(), config.defaults);
    if let Some(flags) = &config.flags {
        for name in flags.columns() {
            schema.set_policy(name, DefaultPolicy::Zero);
        }
    }
    schema
}

/// One full day at fixed template weather, with the scenario's weather
/// applied to `[start_hour, start_hour + 2]` only. Columns the template does
/// not name fall back to the mode of the training frame; capacity bounds come
/// from the training frame's observed extremes.
fn day_template(
    scenario: &DayScenario,
    history: &HistoricalData,
    predictor: &dyn Predictor,
) -> Result<DataFrame, PipelineError> {
    let hours: Vec<f64> = (0..24).map(f64::from).collect();
    let height = hours.len();

    let mut frame = DataFrame::new(vec![Column::new(columns::HOUR.into(), hours)])?;
    frame.with_column(Series::new(
        columns::DAY_OF_WEEK.into(),
        vec![scenario.day_of_week as f64; height],
    ))?;
    frame.with_column(Series::new(columns::MONTH.into(), vec![scenario.month as f64; height]))?;
    for (name, value) in WindowWeather::TEMPLATE.overrides() {
        frame.with_column(Series::new(name.into(), vec![value; height]))?;
    }

    // Remaining model columns fall back to the training-frame mode.
    for name in predictor.feature_names() {
        if frame.column(name).is_ok() {
            continue;
        }
        let value = defaults::resolve_default(history.frame(), name, DefaultPolicy::Mode)?;
        frame.with_column(Series::new(name.as_str().into(), vec![value; height]))?;
    }

    // Perturb the 3-hour window only.
    let window = scenario.window();
    for (name, value) in scenario.weather.overrides() {
        let base = frame.column(name)?.f64()?.clone();
        let patched: Float64Chunked = base
            .into_iter()
            .enumerate()
            .map(|(hour, kept)| {
                if window.contains(&(hour as u32)) { Some(value) } else { kept }
            })
            .collect();
        frame.with_column(patched.with_name(name.into()).into_series())?;
    }

    frame.with_column(Series::new(columns::BASELINE.into(), vec![DAY_BASELINE; height]))?;

    let wants = |name: &str| predictor.feature_names().iter().any(|n| n == name);
    if wants(columns::CAP) {
        let cap = capacity_bound(history.frame(), columns::CAP, true)?;
        frame.with_column(Series::new(columns::CAP.into(), vec![cap; height]))?;
    }
    if wants(columns::FLOOR) {
        let floor = capacity_bound(history.frame(), columns::FLOOR, false)?;
        frame.with_column(Series::new(columns::FLOOR.into(), vec![floor; height]))?;
    }

    Ok(frame)
}

/// Max (or min) of a capacity column over the training frame.
fn capacity_bound(history: &DataFrame, name: &str, upper: bool) -> Result<f64, PipelineError> {
    let column = history.column(name).map_err(|_| {
        PipelineError::SchemaMismatch(format!("historical data is missing capacity column '{name}'"))
    })?;
    let column = column.cast(&DataType::Float64)?;
    let ca = column.f64()?;
    let bound = if upper { ca.max() } else { ca.min() };
    bound.ok_or(PipelineError::EmptyHistoricalData)
}
