use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hexcast::cli::{Cli, Commands};
use hexcast::commands::{day, flow, hex};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Hex(args) => hex::run(&cli, args),
        Commands::Flow(args) => flow::run(&cli, args),
        Commands::Day(args) => day::run(&cli, args),
    }
}
