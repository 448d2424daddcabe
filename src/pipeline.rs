//! The batch pipeline: lookup import, telemetry import, sort, join,
//! segmentation and export, in that order.
//!
//! Each stage logs its start and outcome at info level. A telemetry file
//! that cannot be read is recorded and skipped; a fatal error ends the batch
//! and is returned as `Err`.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Ceiling, ErrorKind, ProfileError, Rejection, Result};
use crate::export::{export_runs, ExportReport, ExportSettings, OutputStore};
use crate::join::{join_samples, sort_samples, JoinReport};
use crate::limits::{MAX_INPUT_FILES, MAX_PATH_LEN, MAX_RUNS};
use crate::lookup::read_lookup_file;
use crate::profile::segment_runs;
use crate::telemetry::{read_telemetry_file, SampleIds, TrainSample};

/// Everything the pipeline needs besides the input files.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub lookup_file: PathBuf,
    pub export: ExportSettings,
    pub max_runs: u32,
}

impl PipelineSettings {
    pub fn new(lookup_file: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            lookup_file: lookup_file.into(),
            export: ExportSettings::new(prefix),
            max_runs: MAX_RUNS,
        }
    }
}

/// Why a telemetry file was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    #[serde(serialize_with = "crate::error::serialize_kind")]
    pub kind: ErrorKind,
    pub message: String,
}

/// Outcome of importing one telemetry file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub samples: usize,
    pub rejected: Vec<Rejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FileFailure>,
}

/// Counts and outcomes of one pipeline pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineReport {
    pub lookup_entries: usize,
    pub lookup_rejected: Vec<Rejection>,
    pub files: Vec<FileReport>,
    pub samples: usize,
    pub join: JoinReport,
    pub runs: u32,
    pub points: usize,
    pub export: ExportReport,
}

impl PipelineReport {
    /// True when every file was imported and every run was written.
    pub fn is_success(&self) -> bool {
        self.files.iter().all(|f| f.failure.is_none()) && self.export.is_success()
    }
}

/// Check the command line file list before any stage runs.
///
/// At least one and fewer than `MAX_INPUT_FILES` paths, each shorter than
/// `MAX_PATH_LEN` bytes and ending in `.csv` after a non-empty stem.
pub fn validate_inputs(files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        return Err(ProfileError::ListEmpty);
    }
    if files.len() >= MAX_INPUT_FILES {
        return Err(ProfileError::limit(
            Ceiling::InputFiles,
            (MAX_INPUT_FILES - 1) as u64,
        ));
    }
    for path in files {
        let text = path.to_string_lossy();
        if text.len() >= MAX_PATH_LEN {
            return Err(ProfileError::NameTooLong {
                name: text.into_owned(),
                len: path.as_os_str().len(),
                max: MAX_PATH_LEN - 1,
            });
        }
        if text.len() <= ".csv".len() || !text.ends_with(".csv") {
            return Err(ProfileError::FormatNotValid(format!(
                "{text} is not a .csv file"
            )));
        }
    }
    Ok(())
}

/// Run the whole batch over `files`, writing run profiles to `store`.
pub fn run_pipeline<S: OutputStore>(
    files: &[PathBuf],
    store: &mut S,
    settings: &PipelineSettings,
) -> Result<PipelineReport> {
    let mut report = PipelineReport::default();

    let lookup_path = settings.lookup_file.as_path();
    tracing::info!("Import Configuration Files... {}", lookup_path.display());
    let lookup = read_lookup_file(lookup_path)
        .map_err(|err| stage_failed("Configuration Files Import Failed!", err))?;
    tracing::info!(entries = lookup.table.len(), "Configuration Files Imported Successfully!");
    report.lookup_entries = lookup.table.len();
    report.lookup_rejected = lookup.rejected;

    let mut ids = SampleIds::new();
    let mut samples: Vec<TrainSample> = Vec::new();
    for path in files {
        let file_report = import_file(path, &mut ids, &mut samples)?;
        report.files.push(file_report);
    }
    report.samples = samples.len();

    tracing::info!("Sort Input Data...");
    sort_samples(&mut samples).map_err(|err| stage_failed("Input Data Sort Failed!", err))?;
    tracing::info!(samples = samples.len(), "Input Data Sorted Successfully!");

    tracing::info!("Preprocess Input Data...");
    report.join = join_samples(&mut samples, &lookup.table)
        .map_err(|err| stage_failed("Input Data Preprocess Failed!", err))?;
    tracing::info!(
        matched = report.join.matched,
        unmatched = report.join.unmatched,
        "Input Data Preprocessed Successfully!"
    );

    tracing::info!("Calculate Speed Profiles...");
    let mut points = segment_runs(&samples, settings.max_runs)
        .map_err(|err| stage_failed("Speed Profiles Calculation Failed!", err))?;
    report.runs = points.last().map_or(0, |p| p.run_id + 1);
    report.points = points.len();
    tracing::info!(runs = report.runs, "Speed Profiles Calculated Successfully!");

    tracing::info!("Export Speed Profiles...");
    report.export = export_runs(&mut points, store, &settings.export);
    if report.export.is_success() {
        tracing::info!(
            files = report.export.written.len(),
            "Speed Profiles Exported Successfully!"
        );
    } else {
        tracing::error!(
            written = report.export.written.len(),
            failed = report.export.failed.len(),
            "Speed Profiles Export Failed!"
        );
    }

    Ok(report)
}

/// Read one telemetry file into `samples`.
///
/// File-level failures are recorded in the returned report; only fatal
/// errors are returned as `Err`.
fn import_file(
    path: &Path,
    ids: &mut SampleIds,
    samples: &mut Vec<TrainSample>,
) -> Result<FileReport> {
    tracing::info!("Import Data Files... {}", path.display());
    match read_telemetry_file(path, ids) {
        Ok(file) => {
            tracing::info!(
                samples = file.samples.len(),
                rejected = file.rejected.len(),
                "Data Files Imported Successfully!"
            );
            let report = FileReport {
                path: path.to_path_buf(),
                samples: file.samples.len(),
                rejected: file.rejected,
                failure: None,
            };
            samples.extend(file.samples);
            Ok(report)
        }
        Err(err) if err.is_fatal() => Err(stage_failed("Data Files Import Failed!", err)),
        Err(err) => {
            tracing::error!(
                "Data Files Import Failed! [{}] {}: {err}",
                err.description(),
                path.display()
            );
            Ok(FileReport {
                path: path.to_path_buf(),
                samples: 0,
                rejected: Vec::new(),
                failure: Some(FileFailure {
                    kind: err.kind(),
                    message: err.to_string(),
                }),
            })
        }
    }
}

fn stage_failed(message: &str, err: ProfileError) -> ProfileError {
    tracing::error!("{message} [{}] {err}", err.description());
    err
}
