//! Command implementations.

pub mod config;
pub mod extract;
pub mod reconcile;

use std::path::Path;

use procure_core::ProcureConfig;

/// Load configuration from the given path, the default location, or
/// defaults, in that order.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ProcureConfig> {
    if let Some(path) = config_path {
        return Ok(ProcureConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        return Ok(ProcureConfig::from_file(&default_path)?);
    }

    Ok(ProcureConfig::default())
}
