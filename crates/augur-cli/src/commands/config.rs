//! Configuration display commands

use std::path::Path;

use anyhow::{Context, Result};
use augur_core::config::default_config_path;
use augur_core::ForecastConfig;

use super::print_json;
use crate::cli::OutputFormat;

pub fn cmd_config_show(config_path: Option<&Path>, output: OutputFormat) -> Result<()> {
    let config = ForecastConfig::load(config_path).context("Failed to load forecast config")?;

    if output == OutputFormat::Json {
        return print_json(&config);
    }

    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    if let Some(path) = config_path {
        if path.exists() {
            println!("{}", path.display());
            return Ok(());
        }
        println!("{} (not present)", path.display());
    }

    match default_config_path() {
        Some(path) if path.exists() => println!("{}", path.display()),
        Some(path) => println!("{} (not present, using built-in defaults)", path.display()),
        None => println!("No config directory available, using built-in defaults"),
    }
    Ok(())
}
