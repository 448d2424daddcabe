//! Output routing: one CSV file per run.
//!
//! Points arrive in run order. Each stretch of consecutive points with the
//! same run id is rendered into one file, named after the first point of the
//! run. A run that cannot be written is reported and skipped; the remaining
//! runs are still exported.

mod format;
mod naming;
mod store;

pub use format::{data_row, description, header_line, render_run};
pub use naming::{allocate_name, NameParts, UNKNOWN_PLATFORM, UNKNOWN_STATION};
pub use store::{FsStore, MemoryStore, OutputStore};

use serde::Serialize;
use std::path::PathBuf;

use crate::error::ErrorKind;
use crate::limits::MAX_NAME_PROBE;
use crate::profile::RunProfilePoint;

/// Naming settings for the router.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub prefix: String,
    /// Highest probe index tried per run (inclusive).
    pub max_probe: u32,
}

impl ExportSettings {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            max_probe: MAX_NAME_PROBE,
        }
    }
}

/// A run profile file that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenProfile {
    pub run_id: u32,
    pub name: String,
    pub path: PathBuf,
    pub points: usize,
}

/// A run that could not be exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRun {
    pub run_id: u32,
    pub points: usize,
    #[serde(serialize_with = "crate::error::serialize_kind")]
    pub kind: ErrorKind,
    pub message: String,
}

/// Outcome of one export pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub written: Vec<WrittenProfile>,
    pub failed: Vec<FailedRun>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write every run in `points` to `store`.
///
/// Points of written runs get their `output_file` set.
pub fn export_runs<S: OutputStore>(
    points: &mut [RunProfilePoint],
    store: &mut S,
    settings: &ExportSettings,
) -> ExportReport {
    let mut report = ExportReport::default();

    let mut start = 0;
    while start < points.len() {
        let run_id = points[start].run_id;
        let len = points[start..]
            .iter()
            .take_while(|p| p.run_id == run_id)
            .count();
        let run = &mut points[start..start + len];
        start += len;

        match write_run(run, store, settings) {
            Ok((name, path)) => {
                tracing::debug!(run = run_id, points = len, "Wrote {}", path.display());
                for point in run.iter_mut() {
                    point.output_file = Some(path.clone());
                }
                report.written.push(WrittenProfile {
                    run_id,
                    name,
                    path,
                    points: len,
                });
            }
            Err(err) => {
                tracing::error!(run = run_id, "Run export failed [{}] {err}", err.description());
                report.failed.push(FailedRun {
                    run_id,
                    points: len,
                    kind: err.kind(),
                    message: err.to_string(),
                });
            }
        }
    }

    report
}

fn write_run<S: OutputStore>(
    run: &[RunProfilePoint],
    store: &mut S,
    settings: &ExportSettings,
) -> crate::error::Result<(String, PathBuf)> {
    let first = &run[0];
    let parts = NameParts {
        prefix: &settings.prefix,
        station_code: &first.station_code,
        platform: &first.platform,
        cc_id: first.cc_id,
        source_file: &first.source_file,
    };
    let name = allocate_name(&*store, &parts, settings.max_probe)?;
    let path = store.write_new(&name, render_run(run).as_bytes())?;
    Ok((name, path))
}
