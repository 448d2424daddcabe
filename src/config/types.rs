//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Block lookup table location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Path of the 11 column block lookup CSV
    #[serde(default = "default_lookup_file")]
    pub file: PathBuf,
}

pub fn default_lookup_file() -> PathBuf {
    PathBuf::from("config").join("atc_block_lut.csv")
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            file: default_lookup_file(),
        }
    }
}

/// Run profile output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory run profile files are written to
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    /// Prefix of every run profile file name
    #[serde(default = "default_output_prefix")]
    pub prefix: String,
}

pub fn default_output_directory() -> PathBuf {
    PathBuf::from("run_profiles")
}

pub fn default_output_prefix() -> String {
    "DEPARTING_FROM_PLATFORM_".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            prefix: default_output_prefix(),
        }
    }
}

/// Travel time summary output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Summary CSV written by `atc-profile summary`
    #[serde(default = "default_summary_file")]
    pub file: PathBuf,
}

pub fn default_summary_file() -> PathBuf {
    PathBuf::from("output").join("travel_time_summary.csv")
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            file: default_summary_file(),
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

pub fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.output.prefix.is_empty() {
            return Err("output.prefix must not be empty".to_string());
        }
        if self.output.prefix.contains(['/', '\\']) {
            return Err(format!(
                "output.prefix {:?} must not contain path separators",
                self.output.prefix
            ));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!(
                "logging.level {:?} is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }
}
