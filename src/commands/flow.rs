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
        &PipelineConfig::net_flow(),
        args.team.as_deref(),
    )?;

    if cli.verbose > 0 {
        let (min, max) = preds.range().unwrap_or((0.0, 0.0));
        eprintln!("[flow] predicted {} cells, net flow {min:.2}..{max:.2}", preds.len());
    }

    write_output(&preds, args.colors, Ramp::NetFlow, args.output.as_deref())
}
