//! Time-series forecast command

use std::path::Path;

use anyhow::{Context, Result};
use augur_core::{load_series, Forecaster};
use tracing::debug;

use super::print_json;
use crate::cli::OutputFormat;

pub fn cmd_series(
    forecaster: &Forecaster,
    file: &Path,
    periods: usize,
    metric: &str,
    output: OutputFormat,
) -> Result<()> {
    let history = load_series(file)
        .with_context(|| format!("Failed to load series from {}", file.display()))?;
    debug!(
        "Forecasting {} from {} ({} points, {} periods)",
        metric,
        file.display(),
        history.len(),
        periods
    );
    let result = forecaster.time_series(&history, periods, metric);

    if output == OutputFormat::Json {
        return print_json(&result);
    }

    println!();
    println!("📈 {} Forecast", metric);
    println!(
        "   History: {} points, trend {} ({:+.2}%), accuracy {}%",
        result.historical.len(),
        result.trend,
        result.trend_pct,
        result.model_accuracy
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if result.forecast.is_empty() {
        println!("   {}", result.summary);
        return Ok(());
    }

    println!(
        "   {:10} │ {:>12} │ {:>12} │ {:>12} │ {:>5}",
        "Date", "Forecast", "Lower", "Upper", "Conf"
    );
    println!("   ───────────┼──────────────┼──────────────┼──────────────┼──────");
    for point in &result.forecast {
        println!(
            "   {:10} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>4.0}%",
            point.date.format("%Y-%m-%d"),
            point.value,
            point.lower_bound,
            point.upper_bound,
            point.confidence * 100.0
        );
    }
    println!();
    println!("   {}", result.summary);

    Ok(())
}
