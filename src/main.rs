//! `stow` command-line entry point.
use std::io;

use anyhow::Result;
use clap::Parser;

use stow::cli::Cli;
use stow::commands;
use stow::config::Config;
use stow::error::StowError;
use stow::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let cli = Cli::parse();

    if cli.version {
        commands::version::run(&mut io::stdout().lock())?;
        return Ok(());
    }

    let config = Config::from_env(&cli).map_err(StowError::from)?;
    logging::init_subscriber(config.verbosity);
    let log = Logger::new(config.verbosity);

    commands::stow::run(&config, &log, &mut io::stdout().lock())
}
