//! Configuration I/O operations

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::ProfileError;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "atc-profile.toml";

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line
    Explicit(PathBuf),
    /// `atc-profile.toml` in the working directory
    Local(PathBuf),
    /// Per-user config file
    User(PathBuf),
    /// No file found
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::Local(p) | ConfigSource::User(p) => {
                Some(p.as_path())
            }
            ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => f.write_str("built-in defaults"),
        }
    }
}

/// Get the per-user config file path (e.g. ~/.config/atc-profile/config.toml)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("atc-profile").join("config.toml"))
}

/// Pick the config file to load.
///
/// An explicit path must exist. Otherwise the local file wins over the user
/// file, and defaults apply when neither exists.
pub fn resolve(
    explicit: Option<&Path>,
    working_dir: &Path,
    user: Option<PathBuf>,
) -> Result<ConfigSource> {
    if let Some(path) = explicit {
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(ConfigSource::Explicit(path.to_path_buf()));
    }

    let local = working_dir.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Ok(ConfigSource::Local(local));
    }

    match user {
        Some(path) if path.is_file() => Ok(ConfigSource::User(path)),
        _ => Ok(ConfigSource::Defaults),
    }
}

/// Load configuration from the resolved source
pub fn load(explicit: Option<&Path>) -> Result<(Config, ConfigSource)> {
    let working_dir = std::env::current_dir().context("Could not determine working directory")?;
    let source = resolve(explicit, &working_dir, user_config_path())?;
    let config = match source.path() {
        Some(path) => load_from(path)?,
        None => Config::default(),
    };
    Ok((config, source))
}

/// Load and validate one config file
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = toml::from_str(&contents).map_err(|e| ProfileError::ConfigInvalid {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    config
        .validate()
        .map_err(|message| ProfileError::ConfigInvalid {
            path: path.to_path_buf(),
            message,
        })?;
    Ok(config)
}

/// Serialize configuration to TOML
pub fn to_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

/// Save configuration to file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    // Ensure config directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let contents = to_toml(config)?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}
