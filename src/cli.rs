//! CLI definitions for atc-profile
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be tested and inspected without running a command.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build clap styles for help output.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "atc-profile")]
#[command(about = "[ ATC Run Profile ] - turn train telemetry logs into per-run speed profiles")]
#[command(
    long_about = "ATC Run Profile - split train telemetry logs into runs and write one
speed/distance profile CSV per run.

Telemetry rows are joined with a block lookup table (station, platform and
direction per track block), sorted per train controller, cut into runs at
station stops, and exported to the output directory.

QUICK START:
    atc-profile process day1.csv day2.csv     Build run profiles
    atc-profile summary                       Summarize travel times
    atc-profile config show                   Show effective configuration
    atc-profile config init                   Write a default config file"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build run profiles from telemetry files
    #[command(long_about = "Build run profiles from one or more telemetry CSV files.

Every file must end in .csv. Up to 98 files can be processed in one batch.
Rows that cannot be parsed are logged and skipped; a file whose header misses
a required column is skipped as a whole. One profile file is written per run
and existing files are never overwritten. Timestamps are read as UTC, so the
epoch seconds in the output do not depend on the host time zone.

EXAMPLES:
    atc-profile process logs/day1.csv
    atc-profile process logs/*.csv --output-dir profiles
    atc-profile process day1.csv --lookup config/atc_block_lut.csv -v
    atc-profile process day1.csv --report report.json")]
    Process(ProcessArgs),

    /// Summarize travel times of written run profiles
    #[command(long_about = "Collect the travel time of every run profile file in a
directory into one CSV, sorted by station, platform, controller and index.

The directory defaults to the configured output directory. The summary file
is never overwritten.

EXAMPLES:
    atc-profile summary
    atc-profile summary profiles --output summary.csv")]
    Summary(SummaryArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Options shared by commands that read the configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArg {
    /// Configuration file to use instead of the default search
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    /// Telemetry CSV files
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Block lookup table (overrides lookup.file)
    #[arg(long, value_name = "PATH")]
    pub lookup: Option<PathBuf>,

    /// Directory for run profile files (overrides output.directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write the pipeline report as JSON
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub config: ConfigArg,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Directory holding run profile files (defaults to output.directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Summary CSV to write (overrides summary.file)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArg,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    #[command(long_about = "Print the effective configuration as TOML, preceded by
a comment naming the file it was loaded from.

EXAMPLE:
    atc-profile config show")]
    Show {
        #[command(flatten)]
        config: ConfigArg,
    },

    /// Write a default configuration file
    #[command(long_about = "Write the default configuration to ./atc-profile.toml
(or the given path). An existing file is kept unless --force is given.

EXAMPLES:
    atc-profile config init
    atc-profile config init --path ~/.config/atc-profile/config.toml --force")]
    Init {
        /// Where to write the file
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}
