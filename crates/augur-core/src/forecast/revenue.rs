//! Revenue forecaster
//!
//! Runs the time-series forecaster over historical revenue and attaches an
//! evenly amortized share of the weighted sales pipeline to every period.

use tracing::debug;

use crate::config::RevenueConfig;
use crate::models::{RevenueForecast, TimeSeriesPoint};
use crate::stats::round_to;

use super::time_series::TimeSeriesForecaster;

/// Metric label used for the underlying series forecast
pub const REVENUE_METRIC: &str = "Revenue";

#[derive(Debug, Clone, Default)]
pub struct RevenueForecaster {
    series: TimeSeriesForecaster,
    config: RevenueConfig,
}

impl RevenueForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(series: TimeSeriesForecaster, config: RevenueConfig) -> Self {
        Self { series, config }
    }

    /// Periods used when the caller has no preference
    pub fn default_periods(&self) -> usize {
        self.config.default_periods
    }

    /// Forecast `periods_ahead` periods of revenue.
    ///
    /// `win_rate` is expected in [0, 1]. The result is empty when the history
    /// is too short to forecast or no periods were requested.
    pub fn forecast(
        &self,
        historical: &[TimeSeriesPoint],
        pipeline_value: f64,
        win_rate: f64,
        periods_ahead: usize,
    ) -> Vec<RevenueForecast> {
        if periods_ahead == 0 {
            return Vec::new();
        }

        let pipeline_weighted = (pipeline_value * win_rate / periods_ahead as f64).round();
        let result = self.series.forecast(historical, periods_ahead, REVENUE_METRIC);

        debug!(
            "Revenue forecast: {} periods, pipeline_weighted={} per period",
            result.forecast.len(),
            pipeline_weighted
        );

        result
            .forecast
            .iter()
            .map(|p| RevenueForecast {
                period: p.date,
                forecast: p.value.round(),
                lower_bound: p.lower_bound.round(),
                upper_bound: p.upper_bound.round(),
                pipeline_weighted,
                confidence: round_to(p.confidence, 2),
            })
            .collect()
    }

    /// Forecast using the configured default horizon
    pub fn forecast_default(
        &self,
        historical: &[TimeSeriesPoint],
        pipeline_value: f64,
        win_rate: f64,
    ) -> Vec<RevenueForecast> {
        self.forecast(historical, pipeline_value, win_rate, self.config.default_periods)
    }
}
