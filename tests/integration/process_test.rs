//! End-to-end runs of `atc-profile process` and `atc-profile summary`

use std::fs;

use crate::helpers::{file_names, run_atc_profile, workspace};

#[test]
fn process_writes_one_file_per_run() {
    let temp = workspace(&["day1.csv", "day2.csv"]);
    let (stdout, stderr, code) = run_atc_profile(temp.path(), &["process", "day1.csv", "day2.csv"]);

    assert_eq!(code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.starts_with(&format!("atc-profile v{}", env!("CARGO_PKG_VERSION"))));
    for stage in [
        "Configuration Files Imported Successfully!",
        "Data Files Imported Successfully!",
        "Input Data Sorted Successfully!",
        "Input Data Preprocessed Successfully!",
        "Speed Profiles Calculated Successfully!",
        "Speed Profiles Exported Successfully!",
    ] {
        assert!(stdout.contains(stage), "missing {stage:?} in:\n{stdout}");
    }
    assert!(stdout.contains("DATE_NOT_VALID"));

    assert_eq!(
        file_names(&temp.path().join("run_profiles")),
        vec![
            "DEPARTING_FROM_PLATFORM_KINB_00_CC027_day1.csv",
            "DEPARTING_FROM_PLATFORM_KINB_00_CC031_day2.csv",
            "DEPARTING_FROM_PLATFORM_UNIA_00_CC027_day1.csv",
        ]
    );
}

#[test]
fn second_run_never_overwrites() {
    let temp = workspace(&["day2.csv"]);
    let (_, _, first) = run_atc_profile(temp.path(), &["process", "day2.csv"]);
    let (_, _, second) = run_atc_profile(temp.path(), &["process", "day2.csv"]);
    assert_eq!((first, second), (0, 0));

    let dir = temp.path().join("run_profiles");
    assert_eq!(
        file_names(&dir),
        vec![
            "DEPARTING_FROM_PLATFORM_KINB_00_CC031_day2.csv",
            "DEPARTING_FROM_PLATFORM_KINB_01_CC031_day2.csv",
        ]
    );
    assert_eq!(
        fs::read_to_string(dir.join("DEPARTING_FROM_PLATFORM_KINB_00_CC031_day2.csv")).unwrap(),
        fs::read_to_string(dir.join("DEPARTING_FROM_PLATFORM_KINB_01_CC031_day2.csv")).unwrap()
    );
}

#[test]
fn failed_file_sets_exit_code_but_others_are_written() {
    let temp = workspace(&["day1.csv", "missing_speed_header.csv"]);
    let (stdout, _, code) = run_atc_profile(
        temp.path(),
        &["process", "day1.csv", "missing_speed_header.csv"],
    );

    assert_eq!(code, 1);
    assert!(stdout.contains("Data Files Import Failed!"));
    assert!(stdout.contains("MISSING_HEADER"));
    assert_eq!(file_names(&temp.path().join("run_profiles")).len(), 2);
}

#[test]
fn missing_lookup_table_stops_the_batch() {
    let temp = workspace(&["day1.csv"]);
    let (stdout, stderr, code) = run_atc_profile(
        temp.path(),
        &["process", "day1.csv", "--lookup", "config/none.csv"],
    );

    assert_eq!(code, 1);
    assert!(stdout.contains("Configuration Files Import Failed!"));
    assert!(stderr.contains("Processing stopped"));
    assert!(!temp.path().join("run_profiles").exists());
}

#[test]
fn flags_override_config_file() {
    let temp = workspace(&["day2.csv"]);
    fs::write(
        temp.path().join("atc-profile.toml"),
        "[output]\ndirectory = \"from_config\"\nprefix = \"RUN_\"\n",
    )
    .unwrap();

    let (_, _, code) = run_atc_profile(
        temp.path(),
        &["process", "day2.csv", "--output-dir", "from_flag"],
    );
    assert_eq!(code, 0);
    assert!(!temp.path().join("from_config").exists());
    assert_eq!(
        file_names(&temp.path().join("from_flag")),
        vec!["RUN_KINB_00_CC031_day2.csv"]
    );
}

#[test]
fn report_is_written_as_json() {
    let temp = workspace(&["day1.csv"]);
    let (_, _, code) = run_atc_profile(
        temp.path(),
        &["process", "day1.csv", "--report", "out/report.json"],
    );
    assert_eq!(code, 0);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("out/report.json")).unwrap())
            .unwrap();
    assert_eq!(report["samples"], 8);
    assert_eq!(report["runs"], 2);
    assert_eq!(report["lookup_entries"], 4);
    assert_eq!(report["files"][0]["rejected"][0]["kind"], "DATE_NOT_VALID");
    assert_eq!(report["export"]["written"].as_array().unwrap().len(), 2);
}

#[test]
fn summary_after_process() {
    let temp = workspace(&["day1.csv", "day2.csv"]);
    let (_, _, code) = run_atc_profile(temp.path(), &["process", "day1.csv", "day2.csv"]);
    assert_eq!(code, 0);

    let (stdout, stderr, code) = run_atc_profile(temp.path(), &["summary"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("3 run profiles summarized (0 skipped)"));

    let summary =
        fs::read_to_string(temp.path().join("output").join("travel_time_summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert_eq!(
        lines.next(),
        Some("file,station_code,platform,cc_id,file_index,travel_time_s")
    );
    assert!(lines
        .next()
        .unwrap()
        .starts_with("DEPARTING_FROM_PLATFORM_KINB_00_CC027_day1.csv,KIN,B,27,0,"));

    let (_, stderr, code) = run_atc_profile(temp.path(), &["summary"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"));
}
