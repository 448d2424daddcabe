//! Unit tests for configuration loading

use atc_profile::config::{resolve, ConfigSource, LOCAL_CONFIG_FILE};
use atc_profile::Config;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::helpers::{fixture_path, load_fixture};

#[test]
fn fixture_config_overrides_only_given_keys() {
    let config = Config::load_from(&fixture_path("config.toml")).unwrap();
    assert_eq!(config.lookup.file, PathBuf::from("lut/atc_block_lut.csv"));
    assert_eq!(config.output.directory, PathBuf::from("profiles"));
    assert_eq!(config.output.prefix, "RUN_");
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.summary, Config::default().summary);
}

#[test]
fn local_file_is_picked_up_from_working_dir() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(LOCAL_CONFIG_FILE), load_fixture("config.toml")).unwrap();

    let source = resolve(None, temp.path(), None).unwrap();
    assert!(matches!(source, ConfigSource::Local(_)));
    let config = Config::load_from(source.path().unwrap()).unwrap();
    assert_eq!(config.output.prefix, "RUN_");
}

#[test]
fn rendered_toml_lists_every_section() {
    let toml = Config::default().to_toml().unwrap();
    for section in ["[lookup]", "[output]", "[summary]", "[logging]"] {
        assert!(toml.contains(section), "missing {section} in:\n{toml}");
    }
    assert!(toml.contains("prefix = \"DEPARTING_FROM_PLATFORM_\""));
}

#[test]
fn empty_file_means_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty.toml");
    fs::write(&path, "").unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}
