//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod scan;

use std::path::{Path, PathBuf};

use docintake_core::IntakeConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docintake")
        .join("config.json")
}

/// Load the configuration at `path`, the default file if it exists, or defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<IntakeConfig> {
    if let Some(path) = path {
        return Ok(IntakeConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(IntakeConfig::from_file(&default_path)?)
    } else {
        Ok(IntakeConfig::default())
    }
}
