//! Error model for the run profile pipeline.
//!
//! `ProfileError` carries the failure details, `ErrorKind` is the flat
//! classification used for log lines and for deciding how far a failure
//! propagates:
//!
//! - row-level kinds drop a single row and ingestion continues
//! - file-level kinds drop one input file and the batch continues
//! - fatal kinds stop the pipeline

use std::fmt;
use std::path::PathBuf;

/// Fixed ceilings enforced by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ceiling {
    /// Telemetry sample ids handed out by the reader.
    SampleIds,
    /// Runs allocated by the segmentation engine.
    Runs,
    /// Candidate output names tried for a single run.
    NameProbes,
    /// Telemetry files accepted on the command line.
    InputFiles,
}

impl fmt::Display for Ceiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ceiling::SampleIds => "sample id",
            Ceiling::Runs => "run count",
            Ceiling::NameProbes => "output name probe",
            Ceiling::InputFiles => "input file count",
        };
        f.write_str(name)
    }
}

/// Flat classification of every failure the pipeline can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotAccessible,
    ReadFailed,
    MalformedLine,
    FormatNotValid,
    DateNotValid,
    MissingHeader,
    ListEmpty,
    LookupEmpty,
    LookupNoMatch,
    ControllerNotValid,
    SpeedNotValid,
    MotionNotValid,
    LimitExceeded,
    FileAlreadyExists,
    NameTooLong,
    ConfigInvalid,
}

impl ErrorKind {
    /// Stable upper-snake description used in log lines.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::FileNotAccessible => "FILE_NOT_ACCESSIBLE",
            ErrorKind::ReadFailed => "READ_FAILED",
            ErrorKind::MalformedLine => "MALFORMED_LINE",
            ErrorKind::FormatNotValid => "FILE_FORMAT_NOT_VALID",
            ErrorKind::DateNotValid => "DATE_NOT_VALID",
            ErrorKind::MissingHeader => "MISSING_HEADER",
            ErrorKind::ListEmpty => "LIST_IS_EMPTY",
            ErrorKind::LookupEmpty => "LUT_IS_EMPTY",
            ErrorKind::LookupNoMatch => "LUT_MATCH_NOT_FOUND",
            ErrorKind::ControllerNotValid => "CC_IS_NOT_VALID",
            ErrorKind::SpeedNotValid => "SPEED_IS_NOT_VALID",
            ErrorKind::MotionNotValid => "MOTION_IS_NOT_VALID",
            ErrorKind::LimitExceeded => "MAXIMUM_NUMBER_EXCEEDED",
            ErrorKind::FileAlreadyExists => "FILE_ALREADY_EXIST",
            ErrorKind::NameTooLong => "INSUFFICIENT_BUFFER_SIZE",
            ErrorKind::ConfigInvalid => "CONFIG_NOT_VALID",
        }
    }

    /// Kinds that only reject the offending row or sample.
    pub fn is_row_level(self) -> bool {
        matches!(
            self,
            ErrorKind::MalformedLine
                | ErrorKind::FormatNotValid
                | ErrorKind::DateNotValid
                | ErrorKind::ControllerNotValid
                | ErrorKind::SpeedNotValid
                | ErrorKind::MotionNotValid
                | ErrorKind::LookupNoMatch
        )
    }

    /// Kinds that stop the whole pipeline.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            ErrorKind::LimitExceeded | ErrorKind::ListEmpty | ErrorKind::LookupEmpty
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Error type for every pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Cannot access {path}: {source}")]
    FileNotAccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line has {found} delimiters, expected at least {expected}")]
    MalformedLine { found: usize, expected: usize },

    #[error("Format not valid: {0}")]
    FormatNotValid(String),

    #[error("Date not valid: {0:?}")]
    DateNotValid(String),

    #[error("Header field {field:?} missing in {file}")]
    MissingHeader { file: String, field: &'static str },

    #[error("No telemetry samples to process")]
    ListEmpty,

    #[error("Block lookup table is empty")]
    LookupEmpty,

    #[error("No lookup entry for block {0:?}")]
    LookupNoMatch(String),

    #[error("Controller id {0:?} is not in 1..=999")]
    ControllerNotValid(String),

    #[error("Speed {0:?} is not a number")]
    SpeedNotValid(String),

    #[error("Motion flag {0:?} is not \"0\" or \"1\"")]
    MotionNotValid(String),

    #[error("Maximum {ceiling} of {limit} exceeded")]
    LimitExceeded { ceiling: Ceiling, limit: u64 },

    #[error("Output file already exists: {0}")]
    FileAlreadyExists(PathBuf),

    #[error("Name is {len} bytes, limit is {max}: {name}")]
    NameTooLong { name: String, len: usize, max: usize },

    #[error("Invalid config {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },
}

impl ProfileError {
    /// Shorthand for a ceiling violation.
    pub fn limit(ceiling: Ceiling, limit: u64) -> Self {
        ProfileError::LimitExceeded { ceiling, limit }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::FileNotAccessible { .. } => ErrorKind::FileNotAccessible,
            ProfileError::ReadFailed { .. } => ErrorKind::ReadFailed,
            ProfileError::MalformedLine { .. } => ErrorKind::MalformedLine,
            ProfileError::FormatNotValid(_) => ErrorKind::FormatNotValid,
            ProfileError::DateNotValid(_) => ErrorKind::DateNotValid,
            ProfileError::MissingHeader { .. } => ErrorKind::MissingHeader,
            ProfileError::ListEmpty => ErrorKind::ListEmpty,
            ProfileError::LookupEmpty => ErrorKind::LookupEmpty,
            ProfileError::LookupNoMatch(_) => ErrorKind::LookupNoMatch,
            ProfileError::ControllerNotValid(_) => ErrorKind::ControllerNotValid,
            ProfileError::SpeedNotValid(_) => ErrorKind::SpeedNotValid,
            ProfileError::MotionNotValid(_) => ErrorKind::MotionNotValid,
            ProfileError::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            ProfileError::FileAlreadyExists(_) => ErrorKind::FileAlreadyExists,
            ProfileError::NameTooLong { .. } => ErrorKind::NameTooLong,
            ProfileError::ConfigInvalid { .. } => ErrorKind::ConfigInvalid,
        }
    }

    pub fn description(&self) -> &'static str {
        self.kind().description()
    }

    pub fn is_row_level(&self) -> bool {
        self.kind().is_row_level()
    }

    /// Running out of output name probes only fails the run being named.
    pub fn is_fatal(&self) -> bool {
        match self {
            ProfileError::LimitExceeded {
                ceiling: Ceiling::NameProbes,
                ..
            } => false,
            other => other.kind().is_fatal(),
        }
    }
}

pub type Result<T, E = ProfileError> = std::result::Result<T, E>;

/// A row that was dropped during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Rejection {
    /// 1-based line number in the source file.
    pub line: usize,
    #[serde(serialize_with = "serialize_kind")]
    pub kind: ErrorKind,
    pub message: String,
}

impl Rejection {
    pub fn new(line: usize, error: &ProfileError) -> Self {
        Self {
            line,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

pub(crate) fn serialize_kind<S: serde::Serializer>(kind: &ErrorKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.description())
}
