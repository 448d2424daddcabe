//! Telemetry row parsing.

use crate::error::{Ceiling, ProfileError, Result};
use crate::limits::MAX_SAMPLE_IDS;
use crate::text;

use super::columns::{ColumnMap, Field};
use super::timestamp::{format_epoch, parse_timestamp};
use super::TrainSample;

/// Sequential sample id allocator shared across all files of a batch.
#[derive(Debug, Clone)]
pub struct SampleIds {
    next: u32,
    ceiling: u32,
}

impl Default for SampleIds {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleIds {
    pub fn new() -> Self {
        Self::with_ceiling(MAX_SAMPLE_IDS)
    }

    /// Allocator that fails once `ceiling` ids have been handed out.
    pub fn with_ceiling(ceiling: u32) -> Self {
        Self { next: 0, ceiling }
    }

    pub fn allocate(&mut self) -> Result<u32> {
        if self.next >= self.ceiling {
            return Err(ProfileError::limit(Ceiling::SampleIds, self.ceiling.into()));
        }
        let id = self.next;
        self.next += 1;
        Ok(id)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

/// Parse one telemetry data row through `map`.
///
/// An id is allocated before the row is validated, so rejected rows leave
/// gaps in the id sequence.
pub fn parse_row(
    line: &str,
    map: &ColumnMap,
    source_file: &str,
    ids: &mut SampleIds,
) -> Result<TrainSample> {
    let cells = text::split_fields(line);
    let cell = |field: Field| map.cell(&cells, field).to_string();

    let id = ids.allocate()?;

    let time = cell(Field::Time);
    let timestamp = parse_timestamp(&time)?;

    let cc = cell(Field::CcId);
    let cc_id = match text::leading_int(&cc) {
        n @ 1..=999 => n as u16,
        _ => return Err(ProfileError::ControllerNotValid(cc)),
    };

    let sort_key = format!("{:03}{}", cc_id, format_epoch(timestamp));

    let motion = cell(Field::Motion);
    let is_motion = match motion.as_str() {
        "0" => false,
        "1" => true,
        _ => return Err(ProfileError::MotionNotValid(motion)),
    };

    Ok(TrainSample {
        id,
        sort_key,
        source_file: text::file_name_of(source_file).to_string(),
        timestamp,
        cc_id,
        is_motion,
        time,
        location: cell(Field::Location),
        block: cell(Field::Block),
        run_number: cell(Field::RunNumber),
        direction: cell(Field::Direction),
        destination_code: cell(Field::DestinationCode),
        origination_code: cell(Field::OriginationCode),
        schedule_class: cell(Field::ScheduleClass),
        cc,
        current_driving_mode: cell(Field::CurrentDrivingMode),
        selected_driving_mode: cell(Field::SelectedDrivingMode),
        talkative: cell(Field::Talkative),
        motion,
        skip_stop: cell(Field::SkipStop),
        doors_open: cell(Field::DoorsOpen),
        door_fault: cell(Field::DoorFault),
        alarm: cell(Field::Alarm),
        emergency_brake: cell(Field::EmergencyBrake),
        speed: cell(Field::Speed),
        joined: None,
        signed_speed_kmh: None,
    })
}
