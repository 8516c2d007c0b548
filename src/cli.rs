use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Scenario forecasting CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "hexcast", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict customer demand per hex cell for one scenario
    Hex(ScenarioArgs),

    /// Predict operational net flow per hex cell for one scenario
    Flow(ScenarioArgs),

    /// Forecast a full day of trips with a 3-hour weather window
    Day(DayArgs),
}

#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Historical feature table (CSV)
    #[arg(value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Trained model artifact (JSON)
    #[arg(value_hint = ValueHint::FilePath)]
    pub model: PathBuf,

    /// Hour of day (0-23)
    #[arg(long, default_value_t = 0)]
    pub hour: u32,

    /// Day of week (0-6, Monday = 0)
    #[arg(long, default_value_t = 0)]
    pub day_of_week: u32,

    /// Month (1-12)
    #[arg(long, default_value_t = 1)]
    pub month: u32,

    /// Temperature (°C)
    #[arg(long, default_value_t = 15.0)]
    pub temp: f64,

    /// Humidity (%)
    #[arg(long, default_value_t = 70.0)]
    pub humidity: f64,

    /// Wind speed (m/s)
    #[arg(long, default_value_t = 5.0)]
    pub wind: f64,

    /// Rainfall (mm/h)
    #[arg(long, default_value_t = 0.0)]
    pub rain: f64,

    /// Cloud cover (%)
    #[arg(long, default_value_t = 50.0)]
    pub clouds: f64,

    /// Event team flag to set (e.g. FireFC)
    #[arg(long)]
    pub team: Option<String>,

    /// Attach RGBA color columns for the map renderer
    #[arg(long)]
    pub colors: bool,

    /// Write the table here instead of stdout (.csv or .json)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DayArgs {
    /// Historical feature table (CSV)
    #[arg(value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Trained model artifact (JSON)
    #[arg(value_hint = ValueHint::FilePath)]
    pub model: PathBuf,

    /// Day of week (0-6, Monday = 0)
    #[arg(long, default_value_t = 1)]
    pub day_of_week: u32,

    /// Month (1-12)
    #[arg(long, default_value_t = 8)]
    pub month: u32,

    /// First hour of the 3-hour weather window (0-21)
    #[arg(long, default_value_t = 10)]
    pub start_hour: u32,

    /// Temperature (°C)
    #[arg(long, default_value_t = 15.0)]
    pub temp: f64,

    /// Rainfall (mm/h)
    #[arg(long, default_value_t = 0.0)]
    pub rain: f64,

    /// Snowfall (mm/h)
    #[arg(long, default_value_t = 0.0)]
    pub snow: f64,

    /// Wind speed (m/s)
    #[arg(long, default_value_t = 2.0)]
    pub wind: f64,

    /// Humidity (%)
    #[arg(long, default_value_t = 50.0)]
    pub humidity: f64,

    /// Write the table here instead of stdout (.csv or .json)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
