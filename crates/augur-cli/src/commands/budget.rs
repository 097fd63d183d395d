//! Budget forecast command

use std::path::Path;

use anyhow::{Context, Result};
use augur_core::{load_budget_input, Forecaster, RiskLevel};
use tracing::debug;

use super::{print_json, truncate};
use crate::cli::OutputFormat;

pub fn cmd_budget(forecaster: &Forecaster, file: &Path, output: OutputFormat) -> Result<()> {
    let input = load_budget_input(file)
        .with_context(|| format!("Failed to load budget from {}", file.display()))?;
    debug!(
        "Forecasting budget {} from {} ({} categories)",
        input.project_id,
        file.display(),
        input.categories.len()
    );
    let forecast = forecaster.budget(&input);

    if output == OutputFormat::Json {
        return print_json(&forecast);
    }

    let risk_icon = match forecast.risk_level {
        RiskLevel::Low => "🟢",
        RiskLevel::Medium => "🟡",
        RiskLevel::High => "🟠",
        RiskLevel::Critical => "🔴",
    };

    println!();
    println!("💰 Budget Forecast: {} ({})", forecast.project_name, forecast.project_id);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Budget:                 {:>14.2}", forecast.budget_total);
    println!("   Spent to date:          {:>14.2}", forecast.spent_to_date);
    println!("   Committed:              {:>14.2}", forecast.committed);
    println!("   Forecast at completion: {:>14.2}", forecast.forecast_at_completion);
    println!(
        "   Variance:               {:>14.2} ({:+.2}%)",
        forecast.variance, forecast.variance_pct
    );
    if forecast.projected_overrun > 0.0 {
        println!("   Projected overrun:      {:>14.2}", forecast.projected_overrun);
    }
    println!(
        "   Burn rate:              {:>14.2}/day, {} days remaining",
        forecast.burn_rate_daily, forecast.days_remaining
    );
    println!(
        "   Risk: {} {}   Confidence: {:.0}%",
        risk_icon,
        forecast.risk_level,
        forecast.confidence * 100.0
    );

    if !forecast.category_forecasts.is_empty() {
        println!();
        println!(
            "   {:20} │ {:>12} │ {:>12} │ {:>12} │ {:>8} │ {:10}",
            "Category", "Budgeted", "Actual", "Forecast", "Var %", "Trend"
        );
        println!("   ─────────────────────┼──────────────┼──────────────┼──────────────┼──────────┼───────────");
        for cat in &forecast.category_forecasts {
            println!(
                "   {:20} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>+7.1}% │ {:10}",
                truncate(&cat.category, 20),
                cat.budgeted,
                cat.actual,
                cat.forecast,
                cat.variance_pct,
                cat.trend.as_str()
            );
        }
    }

    println!();
    println!("   Recommendations:");
    for rec in &forecast.recommendations {
        println!("   • {}", rec);
    }

    Ok(())
}
