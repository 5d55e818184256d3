use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod domain;
mod gitlab;
mod logging;
mod services;

use cli::Cli;
use logging::Verbosity;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));
    commands::handle_commands(&cli)
}
