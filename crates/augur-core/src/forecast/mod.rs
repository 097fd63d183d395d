//! Forecasters
//!
//! - **Time-series** - projects a metric forward with widening intervals
//! - **Budget** - cost at completion, risk tier, category breakdown
//! - **Revenue** - time-series forecast plus weighted sales pipeline
//!
//! ## Usage
//!
//! ```rust,ignore
//! use augur_core::{ForecastConfig, Forecaster};
//!
//! let forecaster = Forecaster::new(ForecastConfig::load(None)?);
//! let result = forecaster.time_series(&history, 8, "Spend");
//! ```
//!
//! The free functions use the built-in defaults and never read config files.

pub mod budget;
pub mod revenue;
pub mod time_series;

pub use budget::BudgetForecaster;
pub use revenue::RevenueForecaster;
pub use time_series::TimeSeriesForecaster;

use crate::config::ForecastConfig;
use crate::models::{BudgetForecast, BudgetInput, ForecastResult, RevenueForecast, TimeSeriesPoint};

/// All three forecasters built from one configuration
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    series: TimeSeriesForecaster,
    budget: BudgetForecaster,
    revenue: RevenueForecaster,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Self {
        let series = TimeSeriesForecaster::with_config(config.series);
        Self {
            revenue: RevenueForecaster::with_config(series.clone(), config.revenue),
            budget: BudgetForecaster::with_config(config.budget),
            series,
        }
    }

    pub fn time_series(
        &self,
        historical: &[TimeSeriesPoint],
        periods_ahead: usize,
        metric: &str,
    ) -> ForecastResult {
        self.series.forecast(historical, periods_ahead, metric)
    }

    pub fn budget(&self, input: &BudgetInput) -> BudgetForecast {
        self.budget.forecast(input)
    }

    pub fn revenue(
        &self,
        historical: &[TimeSeriesPoint],
        pipeline_value: f64,
        win_rate: f64,
        periods_ahead: usize,
    ) -> Vec<RevenueForecast> {
        self.revenue.forecast(historical, pipeline_value, win_rate, periods_ahead)
    }

    pub fn series_forecaster(&self) -> &TimeSeriesForecaster {
        &self.series
    }

    pub fn revenue_forecaster(&self) -> &RevenueForecaster {
        &self.revenue
    }
}

/// Forecast a series with default tuning
pub fn forecast_time_series(
    historical: &[TimeSeriesPoint],
    periods_ahead: usize,
    metric: &str,
) -> ForecastResult {
    TimeSeriesForecaster::new().forecast(historical, periods_ahead, metric)
}

/// Forecast a project budget with default tuning
pub fn forecast_budget(input: &BudgetInput) -> BudgetForecast {
    BudgetForecaster::new().forecast(input)
}

/// Forecast revenue with default tuning
pub fn forecast_revenue(
    historical: &[TimeSeriesPoint],
    pipeline_value: f64,
    win_rate: f64,
    periods_ahead: usize,
) -> Vec<RevenueForecast> {
    RevenueForecaster::new().forecast(historical, pipeline_value, win_rate, periods_ahead)
}
