//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod parse;

use std::path::Path;

use tracing::debug;
use warung_core::WarungConfig;

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<WarungConfig> {
    if let Some(path) = config_path {
        return Ok(WarungConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(WarungConfig::from_file(&default_path)?)
    } else {
        Ok(WarungConfig::default())
    }
}
