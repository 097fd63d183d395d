//! Augur CLI - Forecast event budgets and revenue
//!
//! Usage:
//!   augur series --file spend.csv --periods 8      Forecast a time series
//!   augur budget --file budget.json                Forecast a project budget
//!   augur revenue --file revenue.csv --pipeline 50000 --win-rate 0.3
//!   augur config                                   Show effective tuning

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let output = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match cli.command {
        Commands::Series {
            file,
            periods,
            metric,
        } => {
            let forecaster = commands::load_forecaster(cli.config.as_deref())?;
            commands::cmd_series(&forecaster, &file, periods, &metric, output)
        }
        Commands::Budget { file } => {
            let forecaster = commands::load_forecaster(cli.config.as_deref())?;
            commands::cmd_budget(&forecaster, &file, output)
        }
        Commands::Revenue {
            file,
            pipeline,
            win_rate,
            periods,
        } => {
            let forecaster = commands::load_forecaster(cli.config.as_deref())?;
            commands::cmd_revenue(&forecaster, &file, pipeline, win_rate, periods, output)
        }
        Commands::Config { path } => {
            if path {
                commands::cmd_config_path(cli.config.as_deref())
            } else {
                commands::cmd_config_show(cli.config.as_deref(), output)
            }
        }
    }
}
