//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod format;
pub mod process;

use std::path::Path;

use vicr_core::VicrConfig;

/// Load the configuration named by `--config`, or the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VicrConfig> {
    let config = match config_path {
        Some(path) => VicrConfig::from_file(Path::new(path))?,
        None => VicrConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
