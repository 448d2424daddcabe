//! atc-profile - CLI entry point

mod commands;

use clap::Parser;
use std::process::ExitCode;

use atc_profile::cli::{Cli, Commands, ConfigCommands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Process(args) => commands::process::handle(args),
        Commands::Summary(args) => commands::summary::handle(args).map(|()| true),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { config } => {
                commands::config::handle_show(config.config.as_deref()).map(|()| true)
            }
            ConfigCommands::Init { path, force } => {
                commands::config::handle_init(path, force).map(|()| true)
            }
        },
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
