//! Data models for Augur
//!
//! Every type here is a plain value: built fresh per forecast call and handed
//! back to the caller, who owns rendering and storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single historical observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A projected observation with its confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Point estimate (blend of regression and smoothed level)
    pub value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Confidence in [0, 1], decays with horizon
    pub confidence: f64,
}

impl ForecastPoint {
    /// Width of the confidence interval
    pub fn interval_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Direction of a fitted series or a budget category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increasing" => Ok(Trend::Increasing),
            "decreasing" => Ok(Trend::Decreasing),
            "stable" => Ok(Trend::Stable),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

/// Result of a time-series forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Label of the forecasted metric (e.g., "Revenue")
    pub metric: String,
    /// Input series echoed back
    pub historical: Vec<TimeSeriesPoint>,
    /// One point per requested period, empty when there was too little data
    pub forecast: Vec<ForecastPoint>,
    pub trend: Trend,
    /// Signed trend over the historical window, in percent
    pub trend_pct: f64,
    pub seasonality_detected: bool,
    /// R² as a whole percentage (0-100)
    pub model_accuracy: u8,
    /// Human-readable one-line summary
    pub summary: String,
}

/// Budget line supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub category: String,
    pub budgeted: f64,
    pub actual: f64,
}

impl CategoryInput {
    pub fn new(category: impl Into<String>, budgeted: f64, actual: f64) -> Self {
        Self {
            category: category.into(),
            budgeted,
            actual,
        }
    }
}

/// Projection for a single budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryForecast {
    pub category: String,
    pub budgeted: f64,
    pub actual: f64,
    /// Current run-rate extrapolated to project end
    pub forecast: f64,
    /// Percent over (+) or under (-) the category budget
    pub variance_pct: f64,
    /// Spend pace relative to elapsed time
    pub trend: Trend,
}

/// Budget risk tier, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

/// Everything needed to forecast a project budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInput {
    pub project_name: String,
    pub project_id: String,
    pub budget_total: f64,
    pub spent_to_date: f64,
    /// Fixed obligations not yet spent
    #[serde(default)]
    pub committed: f64,
    pub days_elapsed: u32,
    pub days_total: u32,
    #[serde(default)]
    pub categories: Vec<CategoryInput>,
}

/// Result of a budget forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetForecast {
    pub project_name: String,
    pub project_id: String,
    pub budget_total: f64,
    pub spent_to_date: f64,
    pub committed: f64,
    pub forecast_at_completion: f64,
    /// Budget minus forecast; negative means overrun
    pub variance: f64,
    pub variance_pct: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub burn_rate_daily: f64,
    pub days_remaining: u32,
    /// Overrun amount, never negative
    pub projected_overrun: f64,
    pub recommendations: Vec<String>,
    pub category_forecasts: Vec<CategoryForecast>,
}

/// One forecasted revenue period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueForecast {
    pub period: NaiveDate,
    pub forecast: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Pipeline value times win rate, spread evenly over the horizon
    pub pipeline_weighted: f64,
    pub confidence: f64,
}
