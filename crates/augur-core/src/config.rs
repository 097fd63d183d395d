//! Forecast tuning configuration
//!
//! Every heuristic constant the forecasters use lives here so it can be
//! overridden without touching code.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a layered resolution:
//! 1. An explicit path (e.g. `--config`), if it exists (a missing one is logged and skipped)
//! 2. Override in data dir (~/.local/share/augur/config/forecast.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Sections and keys are all optional; missing keys keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Fewest observations a series may be forecast from, whatever the config says
pub const MIN_OBSERVATIONS: usize = 3;

/// Longest allowed projection step (ten years)
pub const MAX_PERIOD_DAYS: i64 = 3660;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/forecast.toml");

/// Time-series forecaster tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// Exponential smoothing alpha, in (0, 1]
    pub smoothing_alpha: f64,
    /// Weight of the regression line in the blended estimate
    pub linear_weight: f64,
    /// Weight of the last smoothed level in the blended estimate
    pub smoothed_weight: f64,
    /// Per-period growth of the interval multiplier
    pub uncertainty_growth: f64,
    /// Z-score of the confidence interval
    pub z_score: f64,
    /// Confidence lost per forecast period
    pub confidence_decay: f64,
    pub confidence_floor: f64,
    pub confidence_cap: f64,
    /// Trend percentage beyond which a series is increasing/decreasing
    pub trend_threshold_pct: f64,
    /// Lag used by seasonality detection
    pub seasonality_period: usize,
    /// Autocorrelation above which seasonality is flagged
    pub seasonality_threshold: f64,
    /// Minimum historical points required to forecast (at least 3)
    pub min_observations: usize,
    /// Days between projected points, in [1, 3660]
    pub period_days: i64,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.3,
            linear_weight: 0.6,
            smoothed_weight: 0.4,
            uncertainty_growth: 0.15,
            z_score: 1.96,
            confidence_decay: 0.05,
            confidence_floor: 0.5,
            confidence_cap: 0.95,
            trend_threshold_pct: 5.0,
            seasonality_period: 7,
            seasonality_threshold: 0.3,
            min_observations: 3,
            period_days: 7,
        }
    }
}

/// Budget forecaster tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Damping applied to the run-rate for the remaining days
    pub spend_damping: f64,
    /// variance_pct below this is critical
    pub critical_pct: f64,
    /// variance_pct below this is high
    pub high_pct: f64,
    /// variance_pct below this is medium
    pub medium_pct: f64,
    pub confidence_floor: f64,
    /// Points of spend-vs-time difference that make a category trend
    pub category_trend_points: f64,
    /// Category variance_pct above this is flagged as over budget
    pub category_overrun_pct: f64,
    /// Category variance_pct below this is flagged as surplus
    pub category_surplus_pct: f64,
    /// Multiple of the planned daily rate that counts as unsustainable
    pub burn_rate_tolerance: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            spend_damping: 0.8,
            critical_pct: -15.0,
            high_pct: -5.0,
            medium_pct: 0.0,
            confidence_floor: 0.6,
            category_trend_points: 10.0,
            category_overrun_pct: 10.0,
            category_surplus_pct: -20.0,
            burn_rate_tolerance: 1.2,
        }
    }
}

/// Revenue forecaster tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueConfig {
    /// Periods forecast when the caller doesn't say
    pub default_periods: usize,
}

impl Default for RevenueConfig {
    fn default() -> Self {
        Self { default_periods: 4 }
    }
}

/// Full forecast configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub series: SeriesConfig,
    pub budget: BudgetConfig,
    pub revenue: RevenueConfig,
}

impl ForecastConfig {
    /// Load configuration (explicit path, then override dir, then embedded)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let explicit = override_path.and_then(|p| {
            if p.exists() {
                Some(p.to_path_buf())
            } else {
                warn!("Config file {} not found, ignoring", p.display());
                None
            }
        });
        let path = explicit.or_else(|| default_config_path().filter(|p| p.exists()));

        let config = match path {
            Some(path) => {
                info!("Loading forecast config from {}", path.display());
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&content)?
            }
            None => Self::from_toml(DEFAULT_CONFIG)?,
        };

        Ok(config)
    }

    /// Parse and validate config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ForecastConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make forecasts meaningless
    pub fn validate(&self) -> Result<()> {
        let s = &self.series;
        if !(s.smoothing_alpha > 0.0 && s.smoothing_alpha <= 1.0) {
            return Err(Error::Config(format!(
                "series.smoothing_alpha must be in (0, 1], got {}",
                s.smoothing_alpha
            )));
        }
        if s.linear_weight < 0.0 || s.smoothed_weight < 0.0 {
            return Err(Error::Config(
                "series blend weights must not be negative".to_string(),
            ));
        }
        if s.confidence_floor > s.confidence_cap {
            return Err(Error::Config(format!(
                "series.confidence_floor ({}) exceeds confidence_cap ({})",
                s.confidence_floor, s.confidence_cap
            )));
        }
        if s.seasonality_period == 0 {
            return Err(Error::Config(
                "series.seasonality_period must be at least 1".to_string(),
            ));
        }
        if s.min_observations < MIN_OBSERVATIONS {
            return Err(Error::Config(format!(
                "series.min_observations must be at least {}, got {}",
                MIN_OBSERVATIONS, s.min_observations
            )));
        }
        if !(1..=MAX_PERIOD_DAYS).contains(&s.period_days) {
            return Err(Error::Config(format!(
                "series.period_days must be in [1, {}], got {}",
                MAX_PERIOD_DAYS, s.period_days
            )));
        }
        Ok(())
    }

    /// Render as TOML (for `augur config`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("augur").join("config").join("forecast.toml"))
}
