//! CLI argument handling and config subcommands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{run_atc_profile, workspace};

fn atc_profile(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("atc-profile").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env("HOME", dir);
    cmd
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    atc_profile(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_matches_package() {
    let temp = TempDir::new().unwrap();
    atc_profile(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn process_without_files_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    atc_profile(temp.path()).arg("process").assert().failure().code(2);
}

#[test]
fn non_csv_input_is_rejected_before_any_stage() {
    let temp = workspace(&[]);
    fs::write(temp.path().join("day1.txt"), "x").unwrap();

    let (stdout, stderr, code) = run_atc_profile(temp.path(), &["process", "day1.txt"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not a .csv file"), "stderr: {stderr}");
    assert!(!stdout.contains("Import Configuration Files"));
    assert!(!temp.path().join("run_profiles").exists());
}

#[test]
fn too_many_inputs_are_rejected() {
    let temp = workspace(&[]);
    let names: Vec<String> = (0..99).map(|i| format!("f{i}.csv")).collect();
    let mut args = vec!["process"];
    args.extend(names.iter().map(String::as_str));

    let (_, stderr, code) = run_atc_profile(temp.path(), &args);
    assert_eq!(code, 1);
    assert!(stderr.contains("Maximum input file count of 98 exceeded"), "stderr: {stderr}");
}

// ============================================================================
// Config subcommands
// ============================================================================

#[test]
fn config_show_reports_defaults() {
    let temp = TempDir::new().unwrap();
    atc_profile(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Source: built-in defaults"))
        .stdout(predicate::str::contains("prefix = \"DEPARTING_FROM_PLATFORM_\""));
}

#[test]
fn config_init_writes_local_file_once() {
    let temp = TempDir::new().unwrap();
    atc_profile(temp.path()).args(["config", "init"]).assert().success();
    assert!(temp.path().join("atc-profile.toml").is_file());

    atc_profile(temp.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    atc_profile(temp.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();

    atc_profile(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Source: "))
        .stdout(predicate::str::contains("atc-profile.toml"));
}

#[test]
fn invalid_config_file_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("atc-profile.toml"), "[logging]\nlevel = \"loud\"\n").unwrap();
    atc_profile(temp.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}
