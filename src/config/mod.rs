//! Configuration management for atc-profile
//!
//! Settings come from a TOML file with four sections (`[lookup]`, `[output]`,
//! `[summary]`, `[logging]`); every key is optional. Command line flags
//! override what the file says.

mod io;
mod types;

pub use io::{resolve, user_config_path, ConfigSource, LOCAL_CONFIG_FILE};
pub use types::*;

use anyhow::Result;
use std::path::Path;

impl Config {
    /// Load configuration from the first file found, or defaults
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        io::load(explicit)
    }

    /// Load configuration from one specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        io::save(self, path)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        io::to_toml(self)
    }
}
