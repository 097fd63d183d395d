//! Revenue forecast command

use std::path::Path;

use anyhow::{Context, Result};
use augur_core::config::MIN_OBSERVATIONS;
use augur_core::{load_series, Forecaster};
use tracing::debug;

use super::print_json;
use crate::cli::OutputFormat;

pub fn cmd_revenue(
    forecaster: &Forecaster,
    file: &Path,
    pipeline: f64,
    win_rate: f64,
    periods: Option<usize>,
    output: OutputFormat,
) -> Result<()> {
    if !(0.0..=1.0).contains(&win_rate) {
        anyhow::bail!("--win-rate must be between 0 and 1, got {}", win_rate);
    }
    if !pipeline.is_finite() {
        anyhow::bail!("--pipeline must be a finite number");
    }

    let history = load_series(file)
        .with_context(|| format!("Failed to load revenue from {}", file.display()))?;
    let periods = periods.unwrap_or_else(|| forecaster.revenue_forecaster().default_periods());
    debug!(
        "Forecasting revenue from {} ({} points, {} periods, pipeline {} at {})",
        file.display(),
        history.len(),
        periods,
        pipeline,
        win_rate
    );
    let forecasts = forecaster.revenue(&history, pipeline, win_rate, periods);

    if output == OutputFormat::Json {
        return print_json(&forecasts);
    }

    println!();
    println!("💵 Revenue Forecast");
    println!(
        "   History: {} points, pipeline {:.0} at {:.0}% win rate",
        history.len(),
        pipeline,
        win_rate * 100.0
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if forecasts.is_empty() {
        println!("   {}", empty_forecast_reason(forecaster, history.len(), periods));
        return Ok(());
    }

    println!(
        "   {:10} │ {:>12} │ {:>12} │ {:>12} │ {:>10} │ {:>5}",
        "Period", "Forecast", "Lower", "Upper", "Pipeline", "Conf"
    );
    println!("   ───────────┼──────────────┼──────────────┼──────────────┼────────────┼──────");
    for f in &forecasts {
        println!(
            "   {:10} │ {:>12.0} │ {:>12.0} │ {:>12.0} │ {:>10.0} │ {:>4.0}%",
            f.period.format("%Y-%m-%d"),
            f.forecast,
            f.lower_bound,
            f.upper_bound,
            f.pipeline_weighted,
            f.confidence * 100.0
        );
    }

    Ok(())
}

/// Why a revenue forecast came back empty
pub fn empty_forecast_reason(forecaster: &Forecaster, history_len: usize, periods: usize) -> String {
    let needed = forecaster
        .series_forecaster()
        .config()
        .min_observations
        .max(MIN_OBSERVATIONS);

    if history_len < needed {
        format!(
            "Not enough history to forecast (need at least {} points, got {}).",
            needed, history_len
        )
    } else if periods == 0 {
        "No periods requested.".to_string()
    } else {
        "No forecast produced.".to_string()
    }
}
