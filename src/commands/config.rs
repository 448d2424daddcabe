//! Config subcommands handler

use anyhow::Result;
use std::path::{Path, PathBuf};

use atc_profile::config::{Config, LOCAL_CONFIG_FILE};

/// Show the effective configuration as TOML, preceded by its source.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(explicit: Option<&Path>) -> Result<()> {
    let (config, source) = Config::load(explicit)?;
    println!("# Source: {source}");
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration file.
///
/// An existing file is only replaced with `force`.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to replace it)",
            path.display()
        );
    }
    Config::default().save(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
