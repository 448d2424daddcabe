//! Process command handler

use anyhow::{Context, Result};
use std::fs;

use atc_profile::cli::ProcessArgs;
use atc_profile::config::Config;
use atc_profile::export::FsStore;
use atc_profile::logging;
use atc_profile::pipeline::{run_pipeline, validate_inputs, PipelineReport, PipelineSettings};

/// Run the pipeline over the given telemetry files.
///
/// Returns `Ok(false)` when the batch finished but a file or run failed.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: ProcessArgs) -> Result<bool> {
    let (mut config, source) = Config::load(args.config.config.as_deref())?;
    if let Some(lookup) = args.lookup {
        config.lookup.file = lookup;
    }
    if let Some(dir) = args.output_dir {
        config.output.directory = dir;
    }

    logging::init(&config.logging.level, args.verbose);
    println!("atc-profile v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Configuration from {source}");

    validate_inputs(&args.files).context("Invalid input files")?;

    let settings = PipelineSettings::new(&config.lookup.file, config.output.prefix.clone());
    let mut store = FsStore::new(&config.output.directory);
    let report = run_pipeline(&args.files, &mut store, &settings)
        .with_context(|| format!("Processing stopped ({} files)", args.files.len()))?;

    if let Some(path) = &args.report {
        write_report(&report, path)?;
    }

    print_summary(&report, &config.output.directory.display().to_string());
    Ok(report.is_success())
}

fn write_report(report: &PipelineReport, path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))?;
    Ok(())
}

fn print_summary(report: &PipelineReport, output_dir: &str) {
    let rejected: usize = report.files.iter().map(|f| f.rejected.len()).sum();
    let failed_files = report.files.iter().filter(|f| f.failure.is_some()).count();
    println!(
        "{} samples ({} rejected, {} files failed), {} runs, {} profiles written to {}",
        report.samples,
        rejected,
        failed_files,
        report.runs,
        report.export.written.len(),
        output_dir
    );
    for failed in &report.export.failed {
        println!("  run {} not written: {}", failed.run_id, failed.message);
    }
}
