//! Run profile file layout.

use crate::profile::RunProfilePoint;

/// Column labels before the run description.
const LEADING_COLUMNS: [&str; 13] = [
    "Log_Time_[s]",
    "Segment_ID",
    "Distance_Travelled_0_[m]",
    "Distance_Travelled_1_[m]",
    "Accum_Distance_Travelled_[ft]",
    "Permitted_Speed_[km/h]",
    "Measured_Speed_[km/h]",
    "Current_Tag_ID",
    "TI_Tag",
    "Signal_Name",
    "Signal_Name_Graphing",
    "Civil_Speed_[km/h]",
    "Travel_Time_[s]",
];

/// Label of the column after the description.
const TRAILING_COLUMN: &str = "Distance Travelled from Starting Point [ft]";

/// Human readable description of a run, taken from its first point.
pub fn description(first: &RunProfilePoint) -> String {
    let platform = if first.platform.is_empty() {
        String::new()
    } else {
        format!(" Platform {}", first.platform)
    };
    format!(
        "ATC Speed Profile Departing From {}{} to {} ({})",
        first.from_station, platform, first.to_station, first.direction_code
    )
}

/// Header line (without newline) for a run starting at `first`.
pub fn header_line(first: &RunProfilePoint) -> String {
    let description = description(first);
    let mut columns: Vec<&str> = LEADING_COLUMNS.to_vec();
    columns.push(&description);
    columns.push(TRAILING_COLUMN);
    columns.join(",")
}

/// One data row (without newline). `graphing` is the value written in the
/// graphing column, which may be blanked by the caller.
pub fn data_row(point: &RunProfilePoint, graphing: &str) -> String {
    format!(
        "{:.6}, {}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}, {}, {}, {}, {}, {:.6}, {:.6}, {}",
        point.log_time_s,
        point.segment_id,
        point.distance_0_m,
        point.distance_1_m,
        point.accum_distance_ft,
        point.permitted_speed_kmh,
        point.measured_speed_kmh,
        point.current_tag_id,
        point.ti_tag,
        point.signal_name,
        graphing,
        point.civil_speed_kmh,
        point.travel_time_s,
        point.timestamp_text()
    )
}

/// Full file contents for one run.
///
/// The graphing column is left empty whenever it repeats the value of the
/// row written just before it.
pub fn render_run(points: &[RunProfilePoint]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };

    let mut out = header_line(first);
    out.push('\n');

    let mut previous = "";
    for point in points {
        let current = point.signal_name_graphing.as_str();
        let graphing = if current == previous { "" } else { current };
        out.push_str(&data_row(point, graphing));
        out.push('\n');
        previous = current;
    }
    out
}
