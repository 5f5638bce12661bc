//! sps - simple batched TCP connect port scanner.
//!
//! With arguments, runs one scan and exits. Without any, starts the
//! interactive menu.

use anyhow::Context;
use clap::Parser;
use sps::cli::{interactive, Cli, ScanCommand};
use sps::config::{AppSettings, Verbosity};
use sps::error::CliError;
use sps::resolver::SystemResolver;
use sps::{logging, output};
use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let result = if std::env::args_os().len() <= 1 {
        run_interactive().await
    } else {
        run_cli(Cli::parse()).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<CliError>() {
            Some(e @ (CliError::Interrupted(_) | CliError::Cancelled)) => {
                println!();
                println!("{e}");
                ExitCode::from(e.exit_code())
            }
            Some(e) => {
                output::print_error(&format!("{err:#}"));
                ExitCode::from(e.exit_code())
            }
            None => {
                output::print_error(&format!("{err:#}"));
                ExitCode::FAILURE
            }
        },
    }
}

async fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let settings = AppSettings::load(cli.config.as_deref()).context("failed to load settings")?;
    let verbosity = cli.verbosity(&settings);
    logging::init(verbosity);

    let config = cli.scan_config(&settings).map_err(CliError::from)?;
    let command = ScanCommand::new(config, cli.output_format(&settings));
    command.execute(&SystemResolver::new()).await?;
    Ok(())
}

async fn run_interactive() -> anyhow::Result<()> {
    let settings = AppSettings::load(None).context("failed to load settings")?;
    logging::init(Verbosity::Normal);

    let mut prompter = interactive::Prompter::stdin(io::stdout());
    interactive::run(&mut prompter, &settings, &SystemResolver::new()).await?;
    Ok(())
}
