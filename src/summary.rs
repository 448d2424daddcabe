//! Travel time summary over a directory of run profile files.
//!
//! Every run profile file carries its station, platform, probe index and
//! controller id in its name, and its travel time in column 13 of its last
//! row. The summary collects those into one CSV, sorted by station,
//! platform, controller and index.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::error::ProfileError;
use crate::export::{UNKNOWN_PLATFORM, UNKNOWN_STATION};
use crate::text;

/// Zero-based column holding the travel time in a run profile row.
pub const TRAVEL_TIME_COLUMN: usize = 12;

/// Name fields decoded from a run profile file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFileName {
    /// Empty when the run started away from a station.
    pub station_code: String,
    pub platform: String,
    pub file_index: u32,
    pub cc_id: u16,
    pub source_file: String,
}

/// One summary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimeRecord {
    pub file: String,
    pub station_code: String,
    pub platform: String,
    pub cc_id: u16,
    pub file_index: u32,
    pub travel_time_s: f64,
}

/// A file that was left out of the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// Records and skipped files found in one directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryScan {
    pub records: Vec<TravelTimeRecord>,
    pub skipped: Vec<SkippedFile>,
}

/// Decode `<prefix><station:3><platform:1>_<index:02>_CC<cc:03>_<source>`.
pub fn parse_run_file_name(name: &str, prefix: &str) -> Option<RunFileName> {
    let rest = name.strip_prefix(prefix)?;
    let station = rest.get(0..3)?;
    let platform = rest.get(3..4)?;
    let rest = rest.get(4..)?.strip_prefix('_')?;
    let (index, rest) = rest.split_once("_CC")?;
    let (cc, source) = rest.split_once('_')?;

    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if cc.len() != 3 || !cc.bytes().all(|b| b.is_ascii_digit()) || source.is_empty() {
        return None;
    }

    let known = |value: &str, placeholder: &str| {
        if value == placeholder {
            String::new()
        } else {
            value.to_string()
        }
    };

    Some(RunFileName {
        station_code: known(station, UNKNOWN_STATION),
        platform: known(platform, UNKNOWN_PLATFORM),
        file_index: index.parse().ok()?,
        cc_id: cc.parse().ok()?,
        source_file: source.to_string(),
    })
}

/// Travel time of the last non-empty row in a run profile file.
pub fn last_travel_time(contents: &str) -> Option<f64> {
    let last = contents.lines().rev().find(|line| !line.trim().is_empty())?;
    let cells = text::split_fields(last);
    cells.get(TRAVEL_TIME_COLUMN)?.parse().ok()
}

/// Read every run profile file in `dir` whose name starts with `prefix`.
pub fn scan_directory(dir: &Path, prefix: &str) -> Result<SummaryScan> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?;

    let mut scan = SummaryScan::default();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory: {:?}", dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        if !name.starts_with(prefix) || !name.ends_with(".csv") {
            continue;
        }

        match summarize_file(&path, &name, prefix) {
            Ok(record) => {
                tracing::trace!(file = %name, travel_time = record.travel_time_s, "Summarized");
                scan.records.push(record);
            }
            Err(reason) => {
                tracing::warn!("Skipping {name}: {reason}");
                scan.skipped.push(SkippedFile { file: name, reason });
            }
        }
    }

    sort_records(&mut scan.records);
    Ok(scan)
}

fn summarize_file(path: &Path, name: &str, prefix: &str) -> Result<TravelTimeRecord, String> {
    let parts = parse_run_file_name(name, prefix)
        .ok_or_else(|| "file name is not a run profile name".to_string())?;
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let travel_time_s =
        last_travel_time(&contents).ok_or_else(|| "no travel time in last row".to_string())?;

    Ok(TravelTimeRecord {
        file: name.to_string(),
        station_code: parts.station_code,
        platform: parts.platform,
        cc_id: parts.cc_id,
        file_index: parts.file_index,
        travel_time_s,
    })
}

/// Order by station, platform, controller, then probe index.
pub fn sort_records(records: &mut [TravelTimeRecord]) {
    records.sort_by(|a, b| {
        (&a.station_code, &a.platform, a.cc_id, a.file_index).cmp(&(
            &b.station_code,
            &b.platform,
            b.cc_id,
            b.file_index,
        ))
    });
}

/// Write `records` to a new CSV at `path`. An existing file is never replaced.
pub fn write_summary(records: &[TravelTimeRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::AlreadyExists => ProfileError::FileAlreadyExists(path.to_path_buf()),
            _ => ProfileError::FileNotAccessible {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(file);
    for (i, record) in records.iter().enumerate() {
        wtr.serialize(record)
            .with_context(|| format!("serialize summary row #{}", i + 1))?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write summary: {:?}", path))?;
    Ok(())
}

/// Scan `dir` and write the summary to `output`.
pub fn summarize(dir: &Path, prefix: &str, output: &Path) -> Result<SummaryScan> {
    let scan = scan_directory(dir, prefix)?;
    write_summary(&scan.records, output)?;
    tracing::info!(
        files = scan.records.len(),
        skipped = scan.skipped.len(),
        "Travel time summary written to {}",
        output.display()
    );
    Ok(scan)
}
