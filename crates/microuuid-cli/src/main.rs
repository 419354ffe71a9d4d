#![doc = include_str!("../README.md")]

mod cli;

use std::{io::Write, process::ExitCode};

use clap::Parser;
use cli::{
    commands,
    config::{CliArgs, CliConfig},
    telemetry::init_tracing,
};
use tracing::debug;

fn main() -> anyhow::Result<ExitCode> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::from(&args);

    init_tracing(&config.log)?;
    debug!(command = ?args.command, "starting");

    let mut out = std::io::stdout().lock();
    let passed = commands::run(&args.command, &config, &mut out)?;
    out.flush()?;

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
