//! Train telemetry ingestion.
//!
//! Each accepted telemetry row becomes one [`TrainSample`]. Raw column text
//! is kept verbatim next to the few derived values the rest of the pipeline
//! needs (epoch timestamp, controller id, motion flag, sort key).

mod columns;
mod parse;
mod reader;
mod timestamp;

pub use columns::{ColumnMap, Field};
pub use parse::{parse_row, SampleIds};
pub use reader::{read_telemetry, read_telemetry_file, TelemetryFile};
pub use timestamp::{format_epoch, parse_timestamp};

use std::fmt;

use crate::lookup::{Direction, JoinFields};

/// km/h per m/s.
pub const KMH_PER_MS: f64 = 3.6;

/// One telemetry observation.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSample {
    pub id: u32,
    /// Controller id (`%03d`) followed by epoch seconds (`%010d`).
    pub sort_key: String,
    /// Source file name without its directory.
    pub source_file: String,
    pub timestamp: i64,
    pub cc_id: u16,
    pub is_motion: bool,

    pub time: String,
    pub location: String,
    pub block: String,
    pub run_number: String,
    pub direction: String,
    pub destination_code: String,
    pub origination_code: String,
    pub schedule_class: String,
    pub cc: String,
    pub current_driving_mode: String,
    pub selected_driving_mode: String,
    pub talkative: String,
    pub motion: String,
    pub skip_stop: String,
    pub doors_open: String,
    pub door_fault: String,
    pub alarm: String,
    pub emergency_brake: String,
    pub speed: String,

    /// Station data from the lookup table; `None` until joined or when no
    /// entry matches the block.
    pub joined: Option<JoinFields>,
    /// Speed with the direction sign applied; `None` until joined.
    pub signed_speed_kmh: Option<f64>,
}

impl TrainSample {
    /// Raw text of a telemetry column.
    pub fn raw(&self, field: Field) -> &str {
        match field {
            Field::Time => &self.time,
            Field::Location => &self.location,
            Field::Block => &self.block,
            Field::RunNumber => &self.run_number,
            Field::Direction => &self.direction,
            Field::DestinationCode => &self.destination_code,
            Field::OriginationCode => &self.origination_code,
            Field::ScheduleClass => &self.schedule_class,
            Field::CcId => &self.cc,
            Field::CurrentDrivingMode => &self.current_driving_mode,
            Field::SelectedDrivingMode => &self.selected_driving_mode,
            Field::Talkative => &self.talkative,
            Field::Motion => &self.motion,
            Field::SkipStop => &self.skip_stop,
            Field::DoorsOpen => &self.doors_open,
            Field::DoorFault => &self.door_fault,
            Field::Alarm => &self.alarm,
            Field::EmergencyBrake => &self.emergency_brake,
            Field::Speed => &self.speed,
        }
    }

    /// Re-serialize the raw columns in the layout described by `map`.
    pub fn to_row(&self, map: &ColumnMap) -> String {
        let mut cells = vec![""; map.width()];
        for field in Field::ALL {
            cells[map.index(field)] = self.raw(field);
        }
        cells.join(",")
    }

    /// Epoch seconds as written in sort keys and output rows.
    pub fn timestamp_text(&self) -> String {
        format_epoch(self.timestamp)
    }

    pub fn is_platform(&self) -> bool {
        self.joined.as_ref().is_some_and(|j| j.is_platform)
    }

    pub fn travel_direction(&self) -> Option<Direction> {
        self.joined.as_ref().map(|j| j.direction)
    }

    pub fn station_code(&self) -> &str {
        self.joined.as_ref().map_or("", |j| j.station_code.as_str())
    }

    pub fn platform(&self) -> &str {
        self.joined.as_ref().map_or("", |j| j.platform.as_str())
    }

    pub fn from_station(&self) -> &str {
        self.joined.as_ref().map_or("", |j| j.from_station.as_str())
    }

    pub fn to_station(&self) -> &str {
        self.joined.as_ref().map_or("", |j| j.to_station.as_str())
    }

    pub fn direction_code(&self) -> &str {
        self.joined.as_ref().map_or("", |j| j.direction_code.as_str())
    }

    /// Signed speed in m/s; samples without one count as standing still.
    pub fn signed_speed_ms(&self) -> f64 {
        self.signed_speed_kmh.unwrap_or(0.0) / KMH_PER_MS
    }

    pub fn doors_open_flag(&self) -> Option<char> {
        self.doors_open.chars().next()
    }

    pub fn skip_stop_set(&self) -> bool {
        self.skip_stop.starts_with('1')
    }
}

impl fmt::Display for TrainSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} cc={} block={} motion={} doors={} skip={} speed={}",
            self.id,
            self.sort_key,
            self.source_file,
            self.time,
            self.cc_id,
            self.block,
            self.motion,
            self.doors_open,
            self.skip_stop,
            self.speed
        )?;
        if let Some(signed) = self.signed_speed_kmh {
            write!(f, " signed={signed}")?;
        }
        if let Some(joined) = &self.joined {
            write!(
                f,
                " station={} platform={:?} dir={}",
                joined.station_code,
                joined.platform,
                joined.direction.number()
            )?;
        }
        Ok(())
    }
}
