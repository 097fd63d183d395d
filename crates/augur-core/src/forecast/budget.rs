//! Budget forecaster
//!
//! Estimates cost at completion from the current burn rate, classifies the
//! overrun risk, extrapolates each category, and produces rule-based
//! recommendations. Uses straight arithmetic rather than the time-series
//! model.

use tracing::{debug, warn};

use crate::config::BudgetConfig;
use crate::models::{BudgetForecast, BudgetInput, CategoryForecast, CategoryInput, RiskLevel, Trend};
use crate::stats::round_to;

/// Forecaster for project budgets
#[derive(Debug, Clone, Default)]
pub struct BudgetForecaster {
    config: BudgetConfig,
}

impl BudgetForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BudgetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    pub fn forecast(&self, input: &BudgetInput) -> BudgetForecast {
        let cfg = &self.config;

        let days_remaining = input.days_total.saturating_sub(input.days_elapsed);
        let burn_rate_daily = if input.days_elapsed > 0 {
            input.spent_to_date / f64::from(input.days_elapsed)
        } else {
            0.0
        };

        // Committed amounts are fixed obligations, so only the run-rate is damped
        let forecast_at_completion = input.spent_to_date
            + input.committed
            + burn_rate_daily * f64::from(days_remaining) * cfg.spend_damping;

        let variance = input.budget_total - forecast_at_completion;
        let variance_pct = if input.budget_total != 0.0 {
            variance / input.budget_total * 100.0
        } else {
            warn!("Project {} has a zero budget", input.project_id);
            0.0
        };

        let risk_level = self.risk_level(variance_pct);
        let confidence = (1.0 - variance_pct.abs() / 100.0).max(cfg.confidence_floor);

        let time_elapsed_pct = if input.days_total > 0 {
            f64::from(input.days_elapsed) / f64::from(input.days_total) * 100.0
        } else {
            0.0
        };
        // Recommendation thresholds see the unrounded category variances
        let (category_forecasts, category_variances): (Vec<CategoryForecast>, Vec<f64>) = input
            .categories
            .iter()
            .map(|c| self.forecast_category(c, input.days_elapsed, input.days_total, time_elapsed_pct))
            .unzip();

        let recommendations = self.recommendations(
            input,
            risk_level,
            variance_pct,
            burn_rate_daily,
            &category_forecasts,
            &category_variances,
        );

        debug!(
            "Budget forecast for {}: burn={:.2}/day, fac={:.2}, variance={:.2}%, risk={}",
            input.project_id, burn_rate_daily, forecast_at_completion, variance_pct, risk_level
        );

        BudgetForecast {
            project_name: input.project_name.clone(),
            project_id: input.project_id.clone(),
            budget_total: input.budget_total,
            spent_to_date: input.spent_to_date,
            committed: input.committed,
            forecast_at_completion: round_to(forecast_at_completion, 2),
            variance: round_to(variance, 2),
            variance_pct: round_to(variance_pct, 2),
            confidence: round_to(confidence, 2),
            risk_level,
            burn_rate_daily: round_to(burn_rate_daily, 2),
            days_remaining,
            projected_overrun: round_to((-variance).max(0.0), 2),
            recommendations,
            category_forecasts,
        }
    }

    /// Risk tier for a variance percentage (negative = forecast over budget)
    pub fn risk_level(&self, variance_pct: f64) -> RiskLevel {
        let cfg = &self.config;
        if variance_pct < cfg.critical_pct {
            RiskLevel::Critical
        } else if variance_pct < cfg.high_pct {
            RiskLevel::High
        } else if variance_pct < cfg.medium_pct {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    fn forecast_category(
        &self,
        category: &CategoryInput,
        days_elapsed: u32,
        days_total: u32,
        time_elapsed_pct: f64,
    ) -> (CategoryForecast, f64) {
        let forecast = if days_elapsed > 0 {
            category.actual / f64::from(days_elapsed) * f64::from(days_total)
        } else {
            category.budgeted
        };

        let (variance_pct, consumed_pct) = if category.budgeted != 0.0 {
            (
                (forecast / category.budgeted - 1.0) * 100.0,
                category.actual / category.budgeted * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        let pace = consumed_pct - time_elapsed_pct;
        let trend = if pace > self.config.category_trend_points {
            Trend::Increasing
        } else if pace < -self.config.category_trend_points {
            Trend::Decreasing
        } else {
            Trend::Stable
        };

        let rounded = CategoryForecast {
            category: category.category.clone(),
            budgeted: category.budgeted,
            actual: category.actual,
            forecast: round_to(forecast, 2),
            variance_pct: round_to(variance_pct, 2),
            trend,
        };
        (rounded, variance_pct)
    }

    fn recommendations(
        &self,
        input: &BudgetInput,
        risk_level: RiskLevel,
        variance_pct: f64,
        burn_rate_daily: f64,
        categories: &[CategoryForecast],
        category_variances: &[f64],
    ) -> Vec<String> {
        let cfg = &self.config;
        let mut recs = Vec::new();

        match risk_level {
            RiskLevel::Critical => recs.push(format!(
                "Immediate budget review required: forecast exceeds budget by {:.1}%.",
                -variance_pct
            )),
            RiskLevel::High => recs.push(format!(
                "Schedule a budget review: forecast is {:.1}% over budget.",
                -variance_pct
            )),
            RiskLevel::Medium | RiskLevel::Low => {}
        }

        let over: Vec<&str> = categories
            .iter()
            .zip(category_variances)
            .filter(|(_, pct)| **pct > cfg.category_overrun_pct)
            .map(|(c, _)| c.category.as_str())
            .collect();
        if !over.is_empty() {
            recs.push(format!("Categories trending over budget: {}.", over.join(", ")));
        }

        let surplus: Vec<&str> = categories
            .iter()
            .zip(category_variances)
            .filter(|(_, pct)| **pct < cfg.category_surplus_pct)
            .map(|(c, _)| c.category.as_str())
            .collect();
        if !surplus.is_empty() {
            recs.push(format!(
                "Consider reallocating surplus from under-spent categories: {}.",
                surplus.join(", ")
            ));
        }

        if input.days_total > 0 {
            let planned_daily = input.budget_total / f64::from(input.days_total);
            if burn_rate_daily > planned_daily * cfg.burn_rate_tolerance {
                recs.push(format!(
                    "Daily burn rate of {:.2} exceeds the planned {:.2} by more than {:.0}%; the current pace is unsustainable.",
                    burn_rate_daily,
                    planned_daily,
                    (cfg.burn_rate_tolerance - 1.0) * 100.0
                ));
            }
        }

        if recs.is_empty() {
            recs.push("Budget is on track. Continue monitoring spend against plan.".to_string());
        }

        recs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(budget_total: f64, spent: f64, committed: f64, elapsed: u32, total: u32) -> BudgetInput {
        BudgetInput {
            project_name: "Annual Gala".to_string(),
            project_id: "gala-2026".to_string(),
            budget_total,
            spent_to_date: spent,
            committed,
            days_elapsed: elapsed,
            days_total: total,
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_worked_example() {
        let forecast = BudgetForecaster::new().forecast(&input(100_000.0, 60_000.0, 10_000.0, 60, 90));

        assert_eq!(forecast.burn_rate_daily, 1000.0);
        assert_eq!(forecast.days_remaining, 30);
        assert_eq!(forecast.forecast_at_completion, 94_000.0);
        assert_eq!(forecast.variance, 6000.0);
        assert_eq!(forecast.variance_pct, 6.0);
        assert_eq!(forecast.risk_level, RiskLevel::Low);
        assert_eq!(forecast.projected_overrun, 0.0);
        assert_eq!(forecast.confidence, 0.94);
    }

    #[test]
    fn test_zero_spend_is_low_risk() {
        let forecast = BudgetForecaster::new().forecast(&input(50_000.0, 0.0, 0.0, 10, 30));
        assert_eq!(forecast.forecast_at_completion, 0.0);
        assert_eq!(forecast.variance_pct, 100.0);
        assert_eq!(forecast.risk_level, RiskLevel::Low);
        assert_eq!(forecast.confidence, 0.6);
    }

    #[test]
    fn test_zero_days_elapsed() {
        let forecast = BudgetForecaster::new().forecast(&input(10_000.0, 500.0, 0.0, 0, 30));
        assert_eq!(forecast.burn_rate_daily, 0.0);
        assert_eq!(forecast.days_remaining, 30);
        assert_eq!(forecast.forecast_at_completion, 500.0);
    }

    #[test]
    fn test_zero_budget_is_guarded() {
        let forecast = BudgetForecaster::new().forecast(&input(0.0, 100.0, 0.0, 5, 0));
        assert_eq!(forecast.variance_pct, 0.0);
        assert_eq!(forecast.days_remaining, 0);
        assert_eq!(forecast.projected_overrun, 100.0);
        assert!(forecast.variance_pct.is_finite() && forecast.confidence.is_finite());
    }

    #[test]
    fn test_elapsed_past_total_clamps_remaining() {
        let forecast = BudgetForecaster::new().forecast(&input(1000.0, 900.0, 0.0, 40, 30));
        assert_eq!(forecast.days_remaining, 0);
        assert_eq!(forecast.forecast_at_completion, 900.0);
    }

    #[test]
    fn test_risk_tiers() {
        let forecaster = BudgetForecaster::new();
        assert_eq!(forecaster.risk_level(-20.0), RiskLevel::Critical);
        assert_eq!(forecaster.risk_level(-15.0), RiskLevel::High);
        assert_eq!(forecaster.risk_level(-10.0), RiskLevel::High);
        assert_eq!(forecaster.risk_level(-5.0), RiskLevel::Medium);
        assert_eq!(forecaster.risk_level(-0.1), RiskLevel::Medium);
        assert_eq!(forecaster.risk_level(0.0), RiskLevel::Low);
    }

    #[test]
    fn test_critical_overrun_recommendations() {
        // burn 2000/day, fac = 60000 + 2000*30*0.8 = 108000 against 80000
        let forecast = BudgetForecaster::new().forecast(&input(80_000.0, 60_000.0, 0.0, 30, 60));

        assert_eq!(forecast.risk_level, RiskLevel::Critical);
        assert_eq!(forecast.projected_overrun, 28_000.0);
        assert!(forecast.recommendations[0].starts_with("Immediate budget review"));
        assert!(forecast
            .recommendations
            .iter()
            .any(|r| r.contains("unsustainable")));
        assert!(!forecast.recommendations.iter().any(|r| r.contains("on track")));
    }

    #[test]
    fn test_high_risk_recommendation() {
        // Nothing left to burn: fac = 50000 + 56000 = 106000, -6%
        let forecast = BudgetForecaster::new().forecast(&input(100_000.0, 50_000.0, 56_000.0, 90, 90));
        assert_eq!(forecast.risk_level, RiskLevel::High);
        assert!(forecast.recommendations[0].starts_with("Schedule a budget review"));
    }

    #[test]
    fn test_category_forecasts_and_recommendations() {
        let mut budget = input(100_000.0, 30_000.0, 0.0, 30, 90);
        budget.categories = vec![
            CategoryInput::new("Catering", 30_000.0, 15_000.0),
            CategoryInput::new("Venue", 45_000.0, 15_000.0),
            CategoryInput::new("Decor", 25_000.0, 0.0),
        ];

        let forecast = BudgetForecaster::new().forecast(&budget);
        let cats = &forecast.category_forecasts;
        assert_eq!(cats.len(), 3);

        // Catering: 15000/30*90 = 45000, +50%, 50% consumed vs 33% time
        assert_eq!(cats[0].forecast, 45_000.0);
        assert_eq!(cats[0].variance_pct, 50.0);
        assert_eq!(cats[0].trend, Trend::Increasing);

        // Venue: exactly on pace
        assert_eq!(cats[1].forecast, 45_000.0);
        assert_eq!(cats[1].variance_pct, 0.0);
        assert_eq!(cats[1].trend, Trend::Stable);

        // Decor: nothing spent yet
        assert_eq!(cats[2].variance_pct, -100.0);
        assert_eq!(cats[2].trend, Trend::Decreasing);

        assert!(forecast
            .recommendations
            .iter()
            .any(|r| r.contains("over budget: Catering.")));
        assert!(forecast
            .recommendations
            .iter()
            .any(|r| r.contains("reallocating surplus") && r.contains("Decor")));
        assert!(!forecast.recommendations.iter().any(|r| r.contains("on track")));
    }

    #[test]
    fn test_category_thresholds_use_unrounded_variance() {
        let mut budget = input(100_000.0, 20_000.0, 0.0, 50, 100);
        // 5500.2 / 50 * 100 = 11000.4 against 10000: +10.004%, reported as 10.0
        budget.categories = vec![CategoryInput::new("Venue", 10_000.0, 5_500.2)];

        let forecast = BudgetForecaster::new().forecast(&budget);
        assert_eq!(forecast.category_forecasts[0].variance_pct, 10.0);
        assert!(forecast
            .recommendations
            .iter()
            .any(|r| r == "Categories trending over budget: Venue."));
    }

    #[test]
    fn test_category_without_elapsed_days_uses_budget() {
        let mut budget = input(10_000.0, 0.0, 0.0, 0, 30);
        budget.categories = vec![CategoryInput::new("AV", 4_000.0, 0.0)];

        let forecast = BudgetForecaster::new().forecast(&budget);
        assert_eq!(forecast.category_forecasts[0].forecast, 4_000.0);
        assert_eq!(forecast.category_forecasts[0].variance_pct, 0.0);
    }

    #[test]
    fn test_zero_budget_category_is_guarded() {
        let mut budget = input(10_000.0, 100.0, 0.0, 10, 30);
        budget.categories = vec![CategoryInput::new("Misc", 0.0, 100.0)];

        let forecast = BudgetForecaster::new().forecast(&budget);
        assert_eq!(forecast.category_forecasts[0].variance_pct, 0.0);
    }

    #[test]
    fn test_on_track_only_when_nothing_else_fires() {
        let forecast = BudgetForecaster::new().forecast(&input(100_000.0, 60_000.0, 10_000.0, 60, 90));
        assert_eq!(forecast.recommendations.len(), 1);
        assert!(forecast.recommendations[0].contains("on track"));
    }

    #[test]
    fn test_custom_damping() {
        let config = BudgetConfig {
            spend_damping: 1.0,
            ..BudgetConfig::default()
        };
        let forecast =
            BudgetForecaster::with_config(config).forecast(&input(100_000.0, 60_000.0, 10_000.0, 60, 90));
        assert_eq!(forecast.forecast_at_completion, 100_000.0);
        assert_eq!(forecast.risk_level, RiskLevel::Low);
    }
}
