//! Run profile file naming.
//!
//! Names look like `<prefix><station><platform>_<probe>_CC<cc>_<source>`,
//! e.g. `DEPARTING_FROM_PLATFORM_UNIA_00_CC027_day1.csv`. Runs that never
//! matched a station use `___` and `_` in place of the station and platform.
//! The probe counter is bumped until a free name is found.

use crate::error::{Ceiling, ProfileError, Result};
use crate::limits::MAX_FILENAME_LEN;

use super::store::OutputStore;

/// Placeholder for an unknown station code.
pub const UNKNOWN_STATION: &str = "___";
/// Placeholder for an unknown platform.
pub const UNKNOWN_PLATFORM: &str = "_";

/// The parts a run profile name is built from.
#[derive(Debug, Clone, Copy)]
pub struct NameParts<'a> {
    pub prefix: &'a str,
    pub station_code: &'a str,
    pub platform: &'a str,
    pub cc_id: u16,
    pub source_file: &'a str,
}

impl NameParts<'_> {
    /// Name for one probe index.
    pub fn candidate(&self, probe: u32) -> String {
        let station = if self.station_code.is_empty() {
            UNKNOWN_STATION
        } else {
            self.station_code
        };
        let platform = if self.platform.is_empty() {
            UNKNOWN_PLATFORM
        } else {
            self.platform
        };
        format!(
            "{}{}{}_{:02}_CC{:03}_{}",
            self.prefix, station, platform, probe, self.cc_id, self.source_file
        )
    }
}

/// First unused name for probes `0..=max_probe`.
pub fn allocate_name(
    store: &dyn OutputStore,
    parts: &NameParts<'_>,
    max_probe: u32,
) -> Result<String> {
    let first = parts.candidate(0);
    if first.len() > MAX_FILENAME_LEN {
        return Err(ProfileError::NameTooLong {
            len: first.len(),
            name: first,
            max: MAX_FILENAME_LEN,
        });
    }

    (0..=max_probe)
        .map(|probe| parts.candidate(probe))
        .find(|name| !store.exists(name))
        .ok_or_else(|| ProfileError::limit(Ceiling::NameProbes, u64::from(max_probe) + 1))
}
