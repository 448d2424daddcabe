//! Telemetry file reader.
//!
//! Lines are classified one at a time:
//!
//! 1. too few delimiters: rejected as malformed
//! 2. header (few digits): rebinds the column map for the rest of the file
//! 3. anything else: parsed as a data row through the current column map
//!
//! Row-level failures are logged and skipped. A header that misses a column
//! fails the whole file, as does a read error. Hitting the sample id ceiling
//! is fatal and is returned immediately.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{ProfileError, Rejection, Result};
use crate::limits::{TELEMETRY_COLUMNS, TELEMETRY_HEADER_DIGITS};
use crate::text;

use super::columns::ColumnMap;
use super::parse::{parse_row, SampleIds};
use super::TrainSample;

/// Samples read from one telemetry file.
#[derive(Debug, Default)]
pub struct TelemetryFile {
    /// File name without its directory.
    pub source_file: String,
    pub samples: Vec<TrainSample>,
    pub rejected: Vec<Rejection>,
}

/// Open and read one telemetry file.
pub fn read_telemetry_file(path: &Path, ids: &mut SampleIds) -> Result<TelemetryFile> {
    let file = File::open(path).map_err(|source| ProfileError::FileNotAccessible {
        path: path.to_path_buf(),
        source,
    })?;
    read_telemetry(BufReader::new(file), &path.to_string_lossy(), ids)
}

/// Read telemetry rows from `reader`.
///
/// `source` is the path the rows came from; only its file name is stored on
/// the samples.
pub fn read_telemetry<R: BufRead>(
    reader: R,
    source: &str,
    ids: &mut SampleIds,
) -> Result<TelemetryFile> {
    let source_file = text::file_name_of(source).to_string();
    let mut map = ColumnMap::canonical();
    let mut samples = Vec::new();
    let mut rejected = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source_err| ProfileError::ReadFailed {
            path: PathBuf::from(source),
            source: source_err,
        })?;
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        if !text::is_csv_line(line, TELEMETRY_COLUMNS) {
            let err = ProfileError::MalformedLine {
                found: text::delimiter_count(line),
                expected: TELEMETRY_COLUMNS - 1,
            };
            tracing::warn!(file = %source_file, line = line_no, "{err}: {line}");
            rejected.push(Rejection::new(line_no, &err));
            continue;
        }

        if text::is_header(line, TELEMETRY_HEADER_DIGITS) {
            tracing::debug!(file = %source_file, line = line_no, "Binding header: {line}");
            map = ColumnMap::from_header(line, &source_file)?;
            continue;
        }

        match parse_row(line, &map, source, ids) {
            Ok(sample) => {
                tracing::trace!("Sample {sample}");
                samples.push(sample);
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                tracing::warn!(
                    file = %source_file,
                    line = line_no,
                    "Rejected row [{}] {err}: {line}",
                    err.description()
                );
                rejected.push(Rejection::new(line_no, &err));
            }
        }
    }

    Ok(TelemetryFile {
        source_file,
        samples,
        rejected,
    })
}
