use anyhow::Result;

use super::{Ramp, scenario_inputs, write_output};
use crate::cli::{Cli, ScenarioArgs};
use crate::pipeline::{self, PipelineConfig};
use crate::predictor::GbtModel;
use crate::store::HistoricalData;

pub fn run(cli: &Cli, args: &ScenarioArgs) -> Result<()> {
    let history = HistoricalData::from_csv(&args.data)?;
    let model = GbtModel::from_json(&args.model)?;

    let preds = pipeline::build_scenario_predictions(
        &scenario_inputs(args),
        &history,
        &model,
        &PipelineConfig::customer_demand(),
        args.team.as_deref(),
    )?;

    if cli.verbose > 0 {
        eprintln!("[hex] predicted {} cells", preds.len());
    }

    write_output(&preds, args.colors, Ramp::Demand, args.output.as_deref())
}
