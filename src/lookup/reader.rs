//! Lookup file reader.
//!
//! The lookup file has a fixed 11 column layout:
//! `id, location, block, direction letter, direction code, direction number,
//! platform, station code, block length, from station, to station`.
//! Malformed rows are logged and skipped; they never fail the whole file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ProfileError, Rejection, Result};
use crate::limits::{LOOKUP_COLUMNS, LOOKUP_HEADER_DIGITS};
use crate::text;

use super::{BlockLookupEntry, Direction, LookupTable};

/// Result of reading one lookup file.
#[derive(Debug, Default)]
pub struct LookupFile {
    pub table: LookupTable,
    pub rejected: Vec<Rejection>,
}

/// Open and read a lookup file.
pub fn read_lookup_file(path: &Path) -> Result<LookupFile> {
    let file = File::open(path).map_err(|source| ProfileError::FileNotAccessible {
        path: path.to_path_buf(),
        source,
    })?;
    read_lookup(BufReader::new(file), path)
}

/// Read lookup rows from `reader`. `path` is only used in errors and logs.
pub fn read_lookup<R: BufRead>(reader: R, path: &Path) -> Result<LookupFile> {
    let mut entries = Vec::new();
    let mut rejected = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| ProfileError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        if !text::is_csv_line(line, LOOKUP_COLUMNS) {
            let err = ProfileError::MalformedLine {
                found: text::delimiter_count(line),
                expected: LOOKUP_COLUMNS - 1,
            };
            tracing::warn!(file = %path.display(), line = line_no, "{err}: {line}");
            rejected.push(Rejection::new(line_no, &err));
            continue;
        }

        if text::is_header(line, LOOKUP_HEADER_DIGITS) {
            tracing::debug!(file = %path.display(), line = line_no, "Skipping header: {line}");
            continue;
        }

        match parse_entry(line) {
            Ok(entry) => {
                tracing::trace!("Lookup entry {entry}");
                entries.push(entry);
            }
            Err(err) => {
                tracing::warn!(
                    file = %path.display(),
                    line = line_no,
                    "Rejected lookup row [{}] {err}: {line}",
                    err.description()
                );
                rejected.push(Rejection::new(line_no, &err));
            }
        }
    }

    Ok(LookupFile {
        table: LookupTable::new(entries),
        rejected,
    })
}

/// Parse one lookup data row.
pub fn parse_entry(line: &str) -> Result<BlockLookupEntry> {
    let cells = text::split_fields(line);
    let cell = |i: usize| cells.get(i).copied().unwrap_or("").to_string();

    let direction_number = cell(5);
    let direction = Direction::from_code(&direction_number).ok_or_else(|| {
        ProfileError::FormatNotValid(format!(
            "direction number {direction_number:?} is not 1 or 2"
        ))
    })?;

    let platform = cell(6);
    if platform.chars().count() > 1 {
        return Err(ProfileError::FormatNotValid(format!(
            "platform {platform:?} is longer than one character"
        )));
    }

    let block = cell(2);
    let block_number = block_number(&block).ok_or_else(|| {
        ProfileError::FormatNotValid(format!("block {block:?} has no positive block number"))
    })?;

    let direction_letter = cell(3);
    if direction_letter != "L" && direction_letter != "R" {
        return Err(ProfileError::FormatNotValid(format!(
            "direction {direction_letter:?} is not L or R"
        )));
    }

    let block_length_raw = cell(8);
    let block_length_m = block_length_raw.parse::<f64>().map_err(|_| {
        ProfileError::FormatNotValid(format!("block length {block_length_raw:?} is not a number"))
    })?;

    let sort_key = format!("B_{block_number:04}{direction_letter}");

    Ok(BlockLookupEntry {
        id: cell(0),
        location: cell(1),
        block,
        direction_letter,
        direction_code: cell(4),
        direction,
        platform,
        station_code: cell(7),
        block_length_raw,
        block_length_m,
        from_station: cell(9),
        to_station: cell(10),
        sort_key,
    })
}

/// Positive integer prefix of the second `_`-separated token of a block id.
fn block_number(block: &str) -> Option<i64> {
    let token = block.split('_').filter(|t| !t.is_empty()).nth(1)?;
    let number = text::leading_int(token);
    (number > 0).then_some(number)
}
