pub mod day;
pub mod flow;
pub mod hex;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::{
    io::SerWriter,
    prelude::{CsvWriter, DataFrame, JsonFormat, JsonWriter, NamedFrom, Series},
};

use crate::cli::ScenarioArgs;
use crate::pipeline::PredictionOutput;
use crate::render::{self, Rgba};
use crate::scenario::ScenarioInputs;

/// Map ramp used when attaching color columns.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Ramp {
    Demand,
    NetFlow,
}

pub(crate) fn scenario_inputs(args: &ScenarioArgs) -> ScenarioInputs {
    ScenarioInputs {
        hour: args.hour,
        day_of_week: args.day_of_week,
        month: args.month,
        temp: args.temp,
        humidity: args.humidity,
        wind_speed: args.wind,
        rain_1h: args.rain,
        clouds_all: args.clouds,
    }
}

/// Emit a prediction table, optionally with renderer color columns.
pub(crate) fn write_output(
    preds: &PredictionOutput,
    colors: bool,
    ramp: Ramp,
    out: Option<&Path>,
) -> Result<()> {
    let mut frame = preds.to_frame()?;
    if colors {
        attach_colors(&mut frame, &preds.values(), ramp)?;
    }
    write_frame(&mut frame, out)
}

/// Print `frame` to stdout, or write it to `out` as CSV/JSON by extension.
pub(crate) fn write_frame(frame: &mut DataFrame, out: Option<&Path>) -> Result<()> {
    let Some(path) = out else {
        println!("{frame}");
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => {
            let mut file = file;
            CsvWriter::new(&mut file).finish(frame)?;
        }
        Some("json") => {
            JsonWriter::new(file).with_json_format(JsonFormat::Json).finish(frame)?;
        }
        _ => bail!("unsupported output extension (expected .csv or .json): {}", path.display()),
    }
    Ok(())
}

fn attach_colors(frame: &mut DataFrame, values: &[f64], ramp: Ramp) -> Result<()> {
    let colors: Vec<Rgba> = match ramp {
        Ramp::Demand => render::color_batch(values),
        Ramp::NetFlow => values.iter().map(|&v| render::net_flow_color(v)).collect(),
    };

    frame.with_column(Series::new("colorR".into(), colors.iter().map(|c| c.r as u32).collect::<Vec<_>>()))?;
    frame.with_column(Series::new("colorG".into(), colors.iter().map(|c| c.g as u32).collect::<Vec<_>>()))?;
    frame.with_column(Series::new("colorB".into(), colors.iter().map(|c| c.b as u32).collect::<Vec<_>>()))?;
    frame.with_column(Series::new("colorA".into(), colors.iter().map(|c| c.a as u32).collect::<Vec<_>>()))?;

    if matches!(ramp, Ramp::NetFlow) {
        frame.with_column(Series::new(
            "elev".into(),
            values.iter().map(|&v| render::elevation(v)).collect::<Vec<_>>(),
        ))?;
    }
    Ok(())
}
