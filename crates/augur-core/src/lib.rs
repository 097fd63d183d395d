//! Augur Core Library
//!
//! Predictive forecasting for event budgets and revenue:
//! - Statistics kernel (regression, smoothing, seasonality, deviation)
//! - Time-series forecaster with widening confidence intervals
//! - Budget forecaster with risk tiers and recommendations
//! - Revenue forecaster with pipeline weighting
//! - Tunable configuration with embedded defaults and override files
//! - Series/budget input loaders and an optional memoizing cache

pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod import;
pub mod models;
pub mod stats;

pub use cache::{CacheStats, ForecastCache};
pub use config::{BudgetConfig, ForecastConfig, RevenueConfig, SeriesConfig};
pub use error::{Error, Result};
pub use forecast::{
    forecast_budget, forecast_revenue, forecast_time_series, BudgetForecaster, Forecaster,
    RevenueForecaster, TimeSeriesForecaster,
};
pub use import::{load_budget_input, load_series, parse_series_csv, parse_series_json};
pub use models::{
    BudgetForecast, BudgetInput, CategoryForecast, CategoryInput, ForecastPoint, ForecastResult,
    RevenueForecast, RiskLevel, TimeSeriesPoint, Trend,
};
