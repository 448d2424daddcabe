//! Header-driven column binding for telemetry files.
//!
//! Telemetry exports do not guarantee column order, so each file's header row
//! is bound once into a [`ColumnMap`] and every data row of that file is read
//! through it. Rows seen before any header use the canonical order.

use crate::error::{ProfileError, Result};
use crate::limits::TELEMETRY_COLUMNS;
use crate::text;

/// The telemetry columns, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Time,
    Location,
    Block,
    RunNumber,
    Direction,
    DestinationCode,
    OriginationCode,
    ScheduleClass,
    CcId,
    CurrentDrivingMode,
    SelectedDrivingMode,
    Talkative,
    Motion,
    SkipStop,
    DoorsOpen,
    DoorFault,
    Alarm,
    EmergencyBrake,
    Speed,
}

impl Field {
    pub const ALL: [Field; TELEMETRY_COLUMNS] = [
        Field::Time,
        Field::Location,
        Field::Block,
        Field::RunNumber,
        Field::Direction,
        Field::DestinationCode,
        Field::OriginationCode,
        Field::ScheduleClass,
        Field::CcId,
        Field::CurrentDrivingMode,
        Field::SelectedDrivingMode,
        Field::Talkative,
        Field::Motion,
        Field::SkipStop,
        Field::DoorsOpen,
        Field::DoorFault,
        Field::Alarm,
        Field::EmergencyBrake,
        Field::Speed,
    ];

    /// Header text as it appears in telemetry exports.
    pub fn name(self) -> &'static str {
        match self {
            Field::Time => "TIME",
            Field::Location => "LOCATION",
            Field::Block => "BLOCK",
            Field::RunNumber => "RUN NUMBER",
            Field::Direction => "DIRECTION",
            Field::DestinationCode => "DESTINATION CODE",
            Field::OriginationCode => "ORIGINATION CODE",
            Field::ScheduleClass => "SCHEDULE CLASS",
            Field::CcId => "CC ID",
            Field::CurrentDrivingMode => "CURRENT DRIVING MODE",
            Field::SelectedDrivingMode => "SELECTED DRIVING MODE",
            Field::Talkative => "TALKATIVE",
            Field::Motion => "MOTION",
            Field::SkipStop => "SKIP STOP",
            Field::DoorsOpen => "DOORS OPEN",
            Field::DoorFault => "DOOR FAULT",
            Field::Alarm => "ALARM",
            Field::EmergencyBrake => "EMERGENCY BRAKE",
            Field::Speed => "SPEED",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Field to column-ordinal mapping for one telemetry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [usize; TELEMETRY_COLUMNS],
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::canonical()
    }
}

impl ColumnMap {
    /// Positional binding in canonical field order.
    pub fn canonical() -> Self {
        let mut columns = [0; TELEMETRY_COLUMNS];
        for (slot, column) in columns.iter_mut().enumerate() {
            *column = slot;
        }
        Self { columns }
    }

    /// Bind columns from a header line.
    ///
    /// Tokens are trimmed and matched by exact text. When a name repeats the
    /// last occurrence wins. Any field that never appears fails the whole
    /// header with [`ProfileError::MissingHeader`].
    pub fn from_header(line: &str, file: &str) -> Result<Self> {
        let mut bound: [Option<usize>; TELEMETRY_COLUMNS] = [None; TELEMETRY_COLUMNS];

        for (position, token) in text::split_fields(line).into_iter().enumerate() {
            if let Some(field) = Field::ALL.iter().find(|f| f.name() == token) {
                bound[field.slot()] = Some(position);
            }
        }

        let mut columns = [0; TELEMETRY_COLUMNS];
        for field in Field::ALL {
            columns[field.slot()] = bound[field.slot()].ok_or_else(|| ProfileError::MissingHeader {
                file: file.to_string(),
                field: field.name(),
            })?;
        }
        Ok(Self { columns })
    }

    /// Column ordinal bound to `field`.
    pub fn index(&self, field: Field) -> usize {
        self.columns[field.slot()]
    }

    /// Cell for `field`; missing cells read as empty.
    pub fn cell<'a>(&self, cells: &[&'a str], field: Field) -> &'a str {
        cells.get(self.index(field)).copied().unwrap_or("")
    }

    /// Number of cells a row needs to hold every bound column.
    pub fn width(&self) -> usize {
        self.columns.iter().max().map_or(0, |max| max + 1)
    }
}
