//! Unit tests for the full pipeline over fixture files

use atc_profile::export::MemoryStore;
use atc_profile::{run_pipeline, ErrorKind, PipelineSettings};

use crate::helpers::{fixture_path, temp_fixtures};

const PREFIX: &str = "DEPARTING_FROM_PLATFORM_";

fn settings() -> PipelineSettings {
    PipelineSettings::new(fixture_path("atc_block_lut.csv"), PREFIX)
}

#[test]
fn two_files_give_three_runs() {
    let (_temp, files) = temp_fixtures(&["day1.csv", "day2.csv"]);
    let mut store = MemoryStore::new();
    let report = run_pipeline(&files, &mut store, &settings()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.samples, 10);
    assert_eq!(report.join.matched, 10);
    assert_eq!(report.runs, 3);
    assert_eq!(report.points, 10);
    assert_eq!(
        store.names().collect::<Vec<_>>(),
        vec![
            "DEPARTING_FROM_PLATFORM_KINB_00_CC027_day1.csv",
            "DEPARTING_FROM_PLATFORM_KINB_00_CC031_day2.csv",
            "DEPARTING_FROM_PLATFORM_UNIA_00_CC027_day1.csv",
        ]
    );

    let written: Vec<(u32, usize)> = report
        .export
        .written
        .iter()
        .map(|w| (w.run_id, w.points))
        .collect();
    assert_eq!(written, vec![(0, 6), (1, 2), (2, 2)]);
}

#[test]
fn controller_change_starts_its_own_run() {
    let (_temp, files) = temp_fixtures(&["day1.csv", "day2.csv"]);
    let mut store = MemoryStore::new();
    run_pipeline(&files, &mut store, &settings()).unwrap();

    let contents = store
        .get_str("DEPARTING_FROM_PLATFORM_KINB_00_CC031_day2.csv")
        .unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("ATC Speed Profile Departing From King Platform B to Queen (S)"));
    assert_eq!(
        lines[2],
        "2.000000, IVB_102, 10.000000, 10.000000, 32.808400, -1.000000, 36.000000, -1, -1, NA, A, -1.000000, 2.000000, 1535403602"
    );
}

#[test]
fn file_with_bad_header_is_dropped() {
    let (_temp, files) = temp_fixtures(&["day1.csv", "missing_speed_header.csv"]);
    let mut store = MemoryStore::new();
    let report = run_pipeline(&files, &mut store, &settings()).unwrap();

    assert!(!report.is_success());
    assert!(report.files[0].failure.is_none());
    assert_eq!(report.files[0].rejected.len(), 1);
    let failure = report.files[1].failure.as_ref().unwrap();
    assert_eq!(failure.kind, ErrorKind::MissingHeader);
    assert_eq!(store.len(), 2);
}

#[test]
fn rerun_into_same_store_probes_next_index() {
    let (_temp, files) = temp_fixtures(&["day2.csv"]);
    let mut store = MemoryStore::new();
    run_pipeline(&files, &mut store, &settings()).unwrap();
    let report = run_pipeline(&files, &mut store, &settings()).unwrap();

    assert!(report.is_success());
    assert_eq!(
        report.export.written[0].name,
        "DEPARTING_FROM_PLATFORM_KINB_01_CC031_day2.csv"
    );
    assert_eq!(
        store.get("DEPARTING_FROM_PLATFORM_KINB_00_CC031_day2.csv"),
        store.get("DEPARTING_FROM_PLATFORM_KINB_01_CC031_day2.csv")
    );
}

#[test]
fn only_broken_files_means_no_samples() {
    let (_temp, files) = temp_fixtures(&["missing_speed_header.csv"]);
    let err = run_pipeline(&files, &mut MemoryStore::new(), &settings()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ListEmpty);
    assert!(err.is_fatal());
}
