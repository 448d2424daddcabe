//! Sort telemetry samples and join them with the block lookup table.
//!
//! Samples are ordered by sort key (controller id, then time) and each one
//! picks up station, platform and direction data from the first lookup entry
//! with the same block id. Samples without a matching entry are kept as-is.

use crate::error::{ProfileError, Result};
use crate::lookup::LookupTable;
use crate::telemetry::TrainSample;

/// Counts from one join pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct JoinReport {
    pub matched: usize,
    pub unmatched: usize,
    /// Samples with a malformed block or direction column.
    pub format_errors: usize,
    /// Matched samples whose speed column is not numeric.
    pub speed_errors: usize,
}

/// Sort samples by sort key. Equal keys keep their input order.
pub fn sort_samples(samples: &mut [TrainSample]) -> Result<()> {
    if samples.is_empty() {
        return Err(ProfileError::ListEmpty);
    }
    samples.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    Ok(())
}

/// Join every sample with the lookup table.
///
/// Per-sample problems are logged and counted; only an empty table fails the
/// pass.
pub fn join_samples(samples: &mut [TrainSample], table: &LookupTable) -> Result<JoinReport> {
    if table.is_empty() {
        return Err(ProfileError::LookupEmpty);
    }

    let mut report = JoinReport::default();
    for sample in samples.iter_mut() {
        match join_sample(sample, table) {
            Ok(()) => report.matched += 1,
            Err(ProfileError::LookupNoMatch(block)) => {
                tracing::debug!(sample = sample.id, "No lookup entry for block {block:?}");
                report.unmatched += 1;
            }
            Err(err @ ProfileError::SpeedNotValid(_)) => {
                tracing::warn!(sample = sample.id, "[{}] {err}", err.description());
                report.matched += 1;
                report.speed_errors += 1;
            }
            Err(err) => {
                tracing::warn!(sample = sample.id, "[{}] {err}", err.description());
                report.format_errors += 1;
            }
        }
    }
    Ok(report)
}

/// Join a single sample.
///
/// A non-numeric speed still keeps the copied station fields but leaves the
/// signed speed unset.
pub fn join_sample(sample: &mut TrainSample, table: &LookupTable) -> Result<()> {
    if sample.block.len() < 2 || sample.direction.is_empty() {
        return Err(ProfileError::FormatNotValid(format!(
            "sample {} has block {:?} and direction {:?}",
            sample.id, sample.block, sample.direction
        )));
    }

    let entry = table
        .find(&sample.block)
        .ok_or_else(|| ProfileError::LookupNoMatch(sample.block.clone()))?;
    sample.joined = Some(entry.join_fields());

    let magnitude = parse_speed(&sample.speed)?;
    sample.signed_speed_kmh = Some(entry.direction.signed(magnitude));
    Ok(())
}

/// Speed magnitude read from the longest numeric prefix; the text must
/// start with a digit.
fn parse_speed(text: &str) -> Result<f64> {
    let invalid = || ProfileError::SpeedNotValid(text.to_string());
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid());
    }
    text.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| text[..end].parse::<f64>().ok())
        .ok_or_else(invalid)
}
