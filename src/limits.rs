//! Fixed ceilings and schema constants.

/// Sample ids run from 0 up to (not including) this value.
pub const MAX_SAMPLE_IDS: u32 = u32::MAX;

/// Runs per pipeline invocation; ids run from 0 to `MAX_RUNS - 1`.
pub const MAX_RUNS: u32 = 65_535;

/// Highest probe index tried when naming an output file (inclusive).
pub const MAX_NAME_PROBE: u32 = 99;

/// Telemetry files accepted per invocation must be fewer than this.
pub const MAX_INPUT_FILES: usize = 99;

/// Input paths must be shorter than this many bytes.
pub const MAX_PATH_LEN: usize = 512;

/// Maximum filename length for most filesystems.
pub const MAX_FILENAME_LEN: usize = 255;

/// Column count of a telemetry row.
pub const TELEMETRY_COLUMNS: usize = 19;

/// A telemetry line with at most this many digits is a header.
pub const TELEMETRY_HEADER_DIGITS: usize = 1;

/// Column count of a block lookup row.
pub const LOOKUP_COLUMNS: usize = 11;

/// A lookup line with at most this many digits is a header.
pub const LOOKUP_HEADER_DIGITS: usize = 4;

/// Feet per metre.
pub const FEET_PER_METRE: f64 = 3.28084;

/// Gap (seconds) above which a stationary block change starts a new run.
pub const RUN_GAP_SECS: i64 = 3;
