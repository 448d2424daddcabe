//! Unit tests for the travel time summary over exported run profiles

use atc_profile::export::FsStore;
use atc_profile::summary::{scan_directory, summarize, TravelTimeRecord};
use atc_profile::{run_pipeline, PipelineSettings};
use std::fs;

use crate::helpers::{fixture_path, temp_fixtures};

const PREFIX: &str = "DEPARTING_FROM_PLATFORM_";

#[test]
fn summary_of_exported_runs() {
    let (temp, files) = temp_fixtures(&["day1.csv", "day2.csv"]);
    let out_dir = temp.path().join("run_profiles");
    let mut store = FsStore::new(&out_dir);
    let settings = PipelineSettings::new(fixture_path("atc_block_lut.csv"), PREFIX);
    run_pipeline(&files, &mut store, &settings).unwrap();

    let summary_path = temp.path().join("output").join("travel_time_summary.csv");
    let scan = summarize(&out_dir, PREFIX, &summary_path).unwrap();
    assert!(scan.skipped.is_empty());

    let mut rdr = csv::Reader::from_path(&summary_path).unwrap();
    let records: Vec<TravelTimeRecord> = rdr.deserialize().map(|r| r.unwrap()).collect();
    let rows: Vec<(&str, &str, u16, u32, f64)> = records
        .iter()
        .map(|r| {
            (
                r.station_code.as_str(),
                r.platform.as_str(),
                r.cc_id,
                r.file_index,
                r.travel_time_s,
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("KIN", "B", 27, 0, 0.0),
            ("KIN", "B", 31, 0, 2.0),
            ("UNI", "A", 27, 0, 8.0),
        ]
    );
}

#[test]
fn unrelated_files_are_ignored() {
    let (temp, _) = temp_fixtures(&["day1.csv"]);
    fs::write(temp.path().join("DEPARTING_FROM_PLATFORM_notes.txt"), "x").unwrap();
    let scan = scan_directory(temp.path(), PREFIX).unwrap();
    assert!(scan.records.is_empty());
    assert!(scan.skipped.is_empty());
}
