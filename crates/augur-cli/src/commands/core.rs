//! Shared command utilities

use std::path::Path;

use anyhow::{Context, Result};
use augur_core::{ForecastConfig, Forecaster};
use serde::Serialize;

/// Build a forecaster from the resolved configuration
pub fn load_forecaster(config_path: Option<&Path>) -> Result<Forecaster> {
    let config = ForecastConfig::load(config_path).context("Failed to load forecast config")?;
    Ok(Forecaster::new(config))
}

/// Print any serializable result as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
