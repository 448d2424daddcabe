//! Summary command handler

use anyhow::Result;

use atc_profile::cli::SummaryArgs;
use atc_profile::config::Config;
use atc_profile::{logging, summary};

/// Write the travel time summary for a directory of run profiles.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: SummaryArgs) -> Result<()> {
    let (config, _) = Config::load(args.config.config.as_deref())?;
    logging::init(&config.logging.level, 0);

    let dir = args.dir.unwrap_or(config.output.directory);
    let output = args.output.unwrap_or(config.summary.file);

    let scan = summary::summarize(&dir, &config.output.prefix, &output)?;
    println!(
        "{} run profiles summarized ({} skipped) into {}",
        scan.records.len(),
        scan.skipped.len(),
        output.display()
    );
    Ok(())
}
