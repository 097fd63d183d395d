//! Integration tests for augur-core
//!
//! These tests exercise the load → forecast workflow through the public API.

use std::fs;

use augur_core::{
    forecast_budget, forecast_revenue, forecast_time_series, load_budget_input, load_series,
    stats::detect_seasonality, BudgetInput, CategoryInput, ForecastCache, ForecastConfig,
    Forecaster, RiskLevel, TimeSeriesPoint, Trend,
};
use chrono::{Duration, NaiveDate};

/// Twelve weeks of ticket revenue with a mild upward drift
fn ticket_revenue_csv() -> &'static str {
    r#"date,value
2026-01-05,4200
2026-01-12,4350
2026-01-19,4100
2026-01-26,4600
2026-02-02,4550
2026-02-09,4800
2026-02-16,4700
2026-02-23,5050
2026-03-02,4950
2026-03-09,5200
2026-03-16,5300
2026-03-23,5250"#
}

fn weekly(values: &[f64]) -> Vec<TimeSeriesPoint> {
    let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| TimeSeriesPoint::new(start + Duration::days(7 * i as i64), v))
        .collect()
}

// =============================================================================
// Time-series
// =============================================================================

#[test]
fn test_csv_to_forecast_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("revenue.csv");
    fs::write(&path, ticket_revenue_csv()).unwrap();

    let history = load_series(&path).expect("Failed to load series");
    assert_eq!(history.len(), 12);

    let result = forecast_time_series(&history, 6, "Ticket Revenue");
    assert_eq!(result.forecast.len(), 6);
    assert_eq!(result.trend, Trend::Increasing);
    assert!(result.model_accuracy > 80);
    assert!(result
        .summary
        .starts_with("Ticket Revenue trend is increasing (+"));

    let last_date = history.last().unwrap().date;
    for (i, point) in result.forecast.iter().enumerate() {
        assert_eq!(point.date, last_date + Duration::days(7 * (i as i64 + 1)));
        assert!(point.lower_bound <= point.value && point.value <= point.upper_bound);
        assert!((0.5..=0.95).contains(&point.confidence));
        assert!(point.value.is_finite());
    }
}

#[test]
fn test_short_series_never_forecasts() {
    for len in 0..3 {
        let values: Vec<f64> = (0..len).map(|i| 100.0 + i as f64).collect();
        let result = forecast_time_series(&weekly(&values), 4, "Spend");
        assert!(result.forecast.is_empty());
        assert_eq!(result.model_accuracy, 0);
    }
}

#[test]
fn test_intervals_widen_and_confidence_decays() {
    let result = forecast_time_series(&weekly(&[8.0, 11.0, 9.0, 14.0, 10.0, 13.0]), 10, "Spend");

    for pair in result.forecast.windows(2) {
        assert!(pair[1].interval_width() >= pair[0].interval_width());
        assert!(pair[1].confidence <= pair[0].confidence);
    }
}

#[test]
fn test_seasonality_length_guard() {
    let values: Vec<f64> = (0..13).map(|i| if i % 7 == 0 { 50.0 } else { 5.0 }).collect();
    assert!(!detect_seasonality(&values, 7, 0.3));
}

// =============================================================================
// Budget
// =============================================================================

#[test]
fn test_budget_file_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budget.json");
    fs::write(
        &path,
        r#"{
            "project_name": "Spring Conference",
            "project_id": "conf-2026",
            "budget_total": 100000,
            "spent_to_date": 60000,
            "committed": 10000,
            "days_elapsed": 60,
            "days_total": 90,
            "categories": [
                {"category": "Venue", "budgeted": 40000, "actual": 26000},
                {"category": "Catering", "budgeted": 20000, "actual": 20000},
                {"category": "Marketing", "budgeted": 40000, "actual": 14000}
            ]
        }"#,
    )
    .unwrap();

    let input = load_budget_input(&path).unwrap();
    let forecast = forecast_budget(&input);

    assert_eq!(forecast.forecast_at_completion, 94_000.0);
    assert_eq!(forecast.variance_pct, 6.0);
    assert_eq!(forecast.risk_level, RiskLevel::Low);
    assert_eq!(forecast.category_forecasts.len(), 3);

    // Catering: 20000/60*90 = 30000 → +50%
    assert!(forecast.recommendations[0].contains("Catering"));
    // Marketing: 14000/60*90 = 21000 → -47.5%
    assert!(forecast
        .recommendations
        .iter()
        .any(|r| r.contains("surplus") && r.contains("Marketing")));
}

#[test]
fn test_budget_with_zero_elapsed_days() {
    let input = BudgetInput {
        project_name: "Kickoff".to_string(),
        project_id: "k-1".to_string(),
        budget_total: 20_000.0,
        spent_to_date: 0.0,
        committed: 0.0,
        days_elapsed: 0,
        days_total: 45,
        categories: vec![CategoryInput::new("Venue", 10_000.0, 0.0)],
    };

    let forecast = forecast_budget(&input);
    assert_eq!(forecast.burn_rate_daily, 0.0);
    assert_eq!(forecast.forecast_at_completion, 0.0);
    assert_eq!(forecast.risk_level, RiskLevel::Low);
    assert_eq!(forecast.recommendations.len(), 1);
}

// =============================================================================
// Revenue
// =============================================================================

#[test]
fn test_revenue_forecast_records() {
    let history = weekly(&[10_000.0, 10_400.0, 10_900.0, 11_200.0, 11_800.0]);
    let forecasts = forecast_revenue(&history, 60_000.0, 0.25, 5);

    assert_eq!(forecasts.len(), 5);
    assert!(forecasts.iter().all(|f| f.pipeline_weighted == 3000.0));
    assert!(forecasts.windows(2).all(|w| w[1].period > w[0].period));
}

// =============================================================================
// Config + cache
// =============================================================================

#[test]
fn test_config_override_changes_forecast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forecast.toml");
    fs::write(&path, "[series]\nperiod_days = 1\nconfidence_cap = 0.8\n").unwrap();

    let config = ForecastConfig::load(Some(path.as_path())).unwrap();
    let forecaster = Forecaster::new(config);
    let history = weekly(&[1.0, 2.0, 3.0, 4.0]);

    let result = forecaster.time_series(&history, 2, "Spend");
    assert_eq!(result.forecast[0].date, history[3].date + Duration::days(1));
    assert_eq!(result.forecast[0].confidence, 0.8);
}

#[test]
fn test_cache_reuses_forecasts() {
    let cache = ForecastCache::new();
    let forecaster = Forecaster::default();
    let history = weekly(&[3.0, 4.0, 6.0, 5.0]);

    for _ in 0..3 {
        cache.get_or_compute(forecaster.series_forecaster(), &history, 4, "Spend");
    }

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.entries, 1);
}
