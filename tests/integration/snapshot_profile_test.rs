//! Run profile file snapshots
//!
//! Pins the exact layout of generated run profile files.

use atc_profile::export::MemoryStore;
use atc_profile::{run_pipeline, PipelineSettings};
use std::path::PathBuf;

use crate::helpers::fixtures_dir;

fn export_day1() -> MemoryStore {
    let settings = PipelineSettings::new(
        fixtures_dir().join("atc_block_lut.csv"),
        "DEPARTING_FROM_PLATFORM_",
    );
    let files: Vec<PathBuf> = vec![fixtures_dir().join("day1.csv")];
    let mut store = MemoryStore::new();
    let report = run_pipeline(&files, &mut store, &settings).expect("pipeline failed");
    assert!(report.is_success());
    store
}

#[test]
fn snapshot_run_departing_union_platform_a() {
    let store = export_day1();
    let contents = store
        .get_str("DEPARTING_FROM_PLATFORM_UNIA_00_CC027_day1.csv")
        .expect("run 0 not written")
        .to_string();
    insta::assert_snapshot!("run_departing_union_platform_a", contents);
}

#[test]
fn snapshot_run_departing_king_platform_b() {
    let store = export_day1();
    let contents = store
        .get_str("DEPARTING_FROM_PLATFORM_KINB_00_CC027_day1.csv")
        .expect("run 1 not written")
        .to_string();
    insta::assert_snapshot!("run_departing_king_platform_b", contents);
}
