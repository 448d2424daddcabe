//! Run profile output points.

use std::fmt;
use std::path::PathBuf;

use crate::telemetry::{format_epoch, TrainSample};

/// Value written for speeds the telemetry does not carry.
pub const PLACEHOLDER_SPEED: f64 = -1.0;
/// Value written for tag ids the telemetry does not carry.
pub const PLACEHOLDER_TAG: i32 = -1;
/// Value written for the signal name column.
pub const PLACEHOLDER_SIGNAL: &str = "NA";

/// One row of a run profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RunProfilePoint {
    pub sample_id: u32,
    pub sort_key: String,
    pub source_file: String,
    pub timestamp: i64,
    pub cc_id: u16,

    pub run_id: u32,
    pub segment_id: String,
    /// Seconds since the run started.
    pub log_time_s: f64,
    /// Seconds since the train first moved in this run.
    pub travel_time_s: f64,
    /// Signed displacement over the preceding interval (m).
    pub distance_0_m: f64,
    /// Same value as `distance_0_m`; the output format carries both.
    pub distance_1_m: f64,
    /// Path length since the run started (ft).
    pub accum_distance_ft: f64,
    pub permitted_speed_kmh: f64,
    pub measured_speed_kmh: f64,
    pub civil_speed_kmh: f64,
    pub current_tag_id: i32,
    pub ti_tag: i32,
    pub signal_name: String,
    pub signal_name_graphing: String,

    pub station_code: String,
    pub platform: String,
    pub from_station: String,
    pub to_station: String,
    pub direction_code: String,

    /// Set by the output router once the run is written.
    pub output_file: Option<PathBuf>,
}

impl RunProfilePoint {
    /// Point with the passthrough fields of `sample` and zeroed kinematics.
    pub fn from_sample(sample: &TrainSample, run_id: u32) -> Self {
        Self {
            sample_id: sample.id,
            sort_key: sample.sort_key.clone(),
            source_file: sample.source_file.clone(),
            timestamp: sample.timestamp,
            cc_id: sample.cc_id,
            run_id,
            segment_id: sample.block.clone(),
            log_time_s: 0.0,
            travel_time_s: 0.0,
            distance_0_m: 0.0,
            distance_1_m: 0.0,
            accum_distance_ft: 0.0,
            permitted_speed_kmh: PLACEHOLDER_SPEED,
            measured_speed_kmh: sample.signed_speed_kmh.unwrap_or(0.0).abs(),
            civil_speed_kmh: PLACEHOLDER_SPEED,
            current_tag_id: PLACEHOLDER_TAG,
            ti_tag: PLACEHOLDER_TAG,
            signal_name: PLACEHOLDER_SIGNAL.to_string(),
            signal_name_graphing: sample.current_driving_mode.clone(),
            station_code: sample.station_code().to_string(),
            platform: sample.platform().to_string(),
            from_station: sample.from_station().to_string(),
            to_station: sample.to_station().to_string(),
            direction_code: sample.direction_code().to_string(),
            output_file: None,
        }
    }

    pub fn timestamp_text(&self) -> String {
        format_epoch(self.timestamp)
    }
}

impl fmt::Display for RunProfilePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run={} sample={} cc={} {} t={} travel={} d={:.3}m accum={:.3}ft v={}",
            self.run_id,
            self.sample_id,
            self.cc_id,
            self.segment_id,
            self.log_time_s,
            self.travel_time_s,
            self.distance_0_m,
            self.accum_distance_ft,
            self.measured_speed_kmh
        )
    }
}
