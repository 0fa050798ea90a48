#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, CliConfig, Command};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let stdout = std::io::stdout();
    commands::run(&config, &mut stdout.lock())
}

fn log_startup_info(config: &CliConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting snowfall with full config: {:#?}", config);
    } else if let Command::Generate { count, .. } = config.command {
        tracing::info!(
            "Generating {} IDs as datacenter {} worker {}",
            count,
            config.generator.datacenter_id,
            config.generator.worker_id
        );
    }
}
