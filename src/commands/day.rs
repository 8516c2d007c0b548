use anyhow::Result;
use polars::prelude::*;

use super::write_frame;
use crate::cli::{Cli, DayArgs};
use crate::pipeline;
use crate::predictor::GbtModel;
use crate::scenario::{DayScenario, WindowWeather};
use crate::store::HistoricalData;

pub fn run(cli: &Cli, args: &DayArgs) -> Result<()> {
    let history = HistoricalData::from_csv(&args.data)?;
    let model = GbtModel::from_json(&args.model)?;

    let custom = DayScenario {
        day_of_week: args.day_of_week,
        month: args.month,
        start_hour: args.start_hour,
        weather: WindowWeather {
            temp: args.temp,
            rain_1h: args.rain,
            snow_1h: args.snow,
            wind_speed: args.wind,
            humidity: args.humidity,
        },
    };
    let baseline = DayScenario { weather: WindowWeather::TEMPLATE, ..custom };

    let custom_preds = pipeline::build_day_forecast(&custom, &history, &model)?;
    let baseline_preds = pipeline::build_day_forecast(&baseline, &history, &model)?;

    if cli.verbose > 0 {
        eprintln!("[day] weather window {}..={}", args.start_hour, args.start_hour + 2);
    }

    let mut frame = df![
        "hour" => (0u32..24).collect::<Vec<_>>(),
        "custom" => custom_preds.values(),
        "baseline" => baseline_preds.values(),
    ]?;
    write_frame(&mut frame, args.output.as_deref())
}
