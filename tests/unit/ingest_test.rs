//! Unit tests for telemetry and lookup ingestion against fixture files

use atc_profile::lookup::read_lookup_file;
use atc_profile::telemetry::{read_telemetry_file, SampleIds};
use atc_profile::ErrorKind;

use crate::helpers::fixture_path;

#[test]
fn lookup_fixture_loads_all_blocks() {
    let lookup = read_lookup_file(&fixture_path("atc_block_lut.csv")).unwrap();
    assert!(lookup.rejected.is_empty());
    assert_eq!(lookup.table.len(), 4);

    let king = lookup.table.find("IVB_102").unwrap();
    assert_eq!(king.station_code, "KIN");
    assert_eq!(king.platform, "B");
    assert_eq!(king.sort_key, "B_0102L");
    assert!(lookup.table.find("IVB_101").is_some_and(|e| !e.is_platform()));
    assert!(lookup.table.find("IVB_999").is_none());
}

#[test]
fn bad_date_row_is_skipped_and_leaves_an_id_gap() {
    let mut ids = SampleIds::new();
    let file = read_telemetry_file(&fixture_path("day1.csv"), &mut ids).unwrap();

    assert_eq!(file.source_file, "day1.csv");
    assert_eq!(file.samples.len(), 8);
    assert_eq!(file.rejected.len(), 1);
    assert_eq!(file.rejected[0].line, 5);
    assert_eq!(file.rejected[0].kind, ErrorKind::DateNotValid);

    let sample_ids: Vec<u32> = file.samples.iter().map(|s| s.id).collect();
    assert_eq!(sample_ids, vec![0, 1, 2, 4, 5, 6, 7, 8]);
    assert_eq!(ids.issued(), 9);
}

#[test]
fn reordered_header_binds_columns_by_name() {
    let mut ids = SampleIds::new();
    let file = read_telemetry_file(&fixture_path("day2.csv"), &mut ids).unwrap();

    assert_eq!(file.samples.len(), 2);
    let moving = &file.samples[1];
    assert_eq!(moving.cc_id, 31);
    assert_eq!(moving.speed, "36");
    assert_eq!(moving.block, "IVB_102");
    assert!(moving.is_motion);
    assert_eq!(moving.timestamp, 1_535_403_602);
}

#[test]
fn header_missing_a_column_fails_the_file() {
    let mut ids = SampleIds::new();
    let err = read_telemetry_file(&fixture_path("missing_speed_header.csv"), &mut ids).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingHeader);
    assert_eq!(
        err.to_string(),
        "Header field \"SPEED\" missing in missing_speed_header.csv"
    );
}

#[test]
fn missing_file_is_not_accessible() {
    let mut ids = SampleIds::new();
    let err = read_telemetry_file(&fixture_path("nope.csv"), &mut ids).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotAccessible);
    assert_eq!(err.description(), "FILE_NOT_ACCESSIBLE");
}
