//! Shared helpers for binary-level tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// A working directory laid out like a deployment:
/// `config/atc_block_lut.csv` plus the named telemetry fixtures.
pub fn workspace(telemetry: &[&str]) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config_dir = temp.path().join("config");
    fs::create_dir_all(&config_dir).expect("Failed to create config dir");
    fs::write(
        config_dir.join("atc_block_lut.csv"),
        load_fixture("atc_block_lut.csv"),
    )
    .expect("Failed to write lookup table");
    for name in telemetry {
        fs::write(temp.path().join(name), load_fixture(name)).expect("Failed to write fixture");
    }
    temp
}

/// Helper to run atc-profile in `dir` and capture output
pub fn run_atc_profile(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_atc-profile"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env("HOME", dir)
        .output()
        .expect("Failed to execute atc-profile");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Sorted file names in a directory
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|_| panic!("Failed to read {}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
