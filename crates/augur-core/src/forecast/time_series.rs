//! Time-series forecaster
//!
//! Projects future periods by blending a least-squares trend line with the
//! last exponentially smoothed level. Intervals are Gaussian around the
//! blended value and widen linearly with the horizon.

use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use crate::config::{SeriesConfig, MIN_OBSERVATIONS};
use crate::models::{ForecastPoint, ForecastResult, TimeSeriesPoint, Trend};
use crate::stats::{
    detect_seasonality, exponential_smoothing, linear_regression, round_to, standard_deviation,
};

/// Forecaster for a single metric's historical series
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesForecaster {
    config: SeriesConfig,
}

impl TimeSeriesForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SeriesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// Forecast `periods_ahead` future periods of `historical`.
    ///
    /// Never fails: with fewer than `min_observations` points (never less
    /// than three) the result has an empty forecast, a stable trend and zero
    /// accuracy.
    pub fn forecast(
        &self,
        historical: &[TimeSeriesPoint],
        periods_ahead: usize,
        metric: &str,
    ) -> ForecastResult {
        let cfg = &self.config;
        let min_observations = cfg.min_observations.max(MIN_OBSERVATIONS);

        let last = match historical.last() {
            Some(last) if historical.len() >= min_observations => last,
            _ => {
                warn!(
                    "Not forecasting {}: {} observations, need {}",
                    metric,
                    historical.len(),
                    min_observations
                );
                return insufficient_data(historical, metric, min_observations);
            }
        };

        let values: Vec<f64> = historical.iter().map(|p| p.value).collect();
        let n = values.len();

        let fit = linear_regression(&values);
        let smoothed = exponential_smoothing(&values, cfg.smoothing_alpha);
        let last_smoothed = smoothed.last().copied().unwrap_or(last.value);
        let seasonal = detect_seasonality(&values, cfg.seasonality_period, cfg.seasonality_threshold);
        let std_dev = standard_deviation(&values);

        let trend_pct = if values[0] != 0.0 {
            fit.slope * n as f64 / values[0] * 100.0
        } else {
            0.0
        };
        let trend = self.classify(trend_pct);

        debug!(
            "Forecasting {} from {} points: slope={:.4}, intercept={:.4}, r2={:.4}, std_dev={:.4}, seasonal={}",
            metric, n, fit.slope, fit.intercept, fit.r2, std_dev, seasonal
        );

        let forecast = (1..=periods_ahead)
            .map(|i| {
                let step = i as f64;
                let linear = fit.predict((n + i - 1) as f64);
                let blended = cfg.linear_weight * linear + cfg.smoothed_weight * last_smoothed;
                let interval = std_dev * cfg.z_score * (1.0 + cfg.uncertainty_growth * step);
                let confidence = (fit.r2 - cfg.confidence_decay * step)
                    .max(cfg.confidence_floor)
                    .min(cfg.confidence_cap);

                ForecastPoint {
                    date: project_date(last.date, cfg.period_days, i),
                    value: round_to(blended, 2),
                    lower_bound: round_to(blended - interval, 2),
                    upper_bound: round_to(blended + interval, 2),
                    confidence: round_to(confidence, 2),
                }
            })
            .collect();

        let model_accuracy = (fit.r2 * 100.0).round().clamp(0.0, 100.0) as u8;
        let trend_pct = round_to(trend_pct, 2);

        ForecastResult {
            metric: metric.to_string(),
            historical: historical.to_vec(),
            forecast,
            trend,
            trend_pct,
            seasonality_detected: seasonal,
            model_accuracy,
            summary: summarize(metric, trend, trend_pct, model_accuracy, seasonal),
        }
    }

    fn classify(&self, trend_pct: f64) -> Trend {
        let threshold = self.config.trend_threshold_pct;
        if trend_pct > threshold {
            Trend::Increasing
        } else if trend_pct < -threshold {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

/// Date of the `i`-th projected period after `last`, saturating at `NaiveDate::MAX`
fn project_date(last: NaiveDate, period_days: i64, i: usize) -> NaiveDate {
    let offset = period_days.saturating_mul(i64::try_from(i).unwrap_or(i64::MAX));
    Duration::try_days(offset)
        .and_then(|delta| last.checked_add_signed(delta))
        .unwrap_or(NaiveDate::MAX)
}

fn insufficient_data(
    historical: &[TimeSeriesPoint],
    metric: &str,
    min_observations: usize,
) -> ForecastResult {
    ForecastResult {
        metric: metric.to_string(),
        historical: historical.to_vec(),
        forecast: Vec::new(),
        trend: Trend::Stable,
        trend_pct: 0.0,
        seasonality_detected: false,
        model_accuracy: 0,
        summary: format!(
            "Insufficient data to forecast {}: at least {} data points are required, got {}.",
            metric,
            min_observations,
            historical.len()
        ),
    }
}

fn summarize(metric: &str, trend: Trend, trend_pct: f64, accuracy: u8, seasonal: bool) -> String {
    let mut summary = format!(
        "{} trend is {} ({:+.1}%) with {}% model accuracy.",
        metric, trend, trend_pct, accuracy
    );
    if seasonal {
        summary.push_str(" Seasonality detected.");
    }
    summary
}
