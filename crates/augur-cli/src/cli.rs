//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Augur - Forecast event budgets and revenue
#[derive(Parser)]
#[command(name = "augur")]
#[command(about = "Statistical forecasting for event budgets and revenue", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Tuning config file (defaults to the data dir override, then built-ins)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast a historical time series
    Series {
        /// Series file: CSV with date,value columns or a JSON array
        #[arg(short, long)]
        file: PathBuf,

        /// Number of weekly periods to forecast
        #[arg(short, long, default_value = "4")]
        periods: usize,

        /// Label for the metric in the summary
        #[arg(short, long, default_value = "Value")]
        metric: String,
    },

    /// Forecast a project budget from a JSON snapshot
    Budget {
        /// Budget JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Forecast revenue with a weighted sales pipeline
    Revenue {
        /// Historical revenue file (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Open pipeline value
        #[arg(long, default_value = "0")]
        pipeline: f64,

        /// Historical win rate (0.0 - 1.0)
        #[arg(long, default_value = "0")]
        win_rate: f64,

        /// Periods to forecast (defaults to the configured horizon)
        #[arg(short, long)]
        periods: Option<usize>,
    },

    /// Show the effective forecast configuration
    Config {
        /// Print the override file location instead
        #[arg(long)]
        path: bool,
    },
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
