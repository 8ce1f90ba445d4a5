//! End-to-end scenarios driving the engine over an in-memory data source.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use epiforecast::core::RawObservation;
use epiforecast::engine::{ForecastEngine, StaticDataSource, DEFAULT_HORIZON};
use epiforecast::error::ForecastError;
use epiforecast::insights::TrendDirection;
use epiforecast::models::ForecasterKind;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 4).unwrap()
}

fn daily(n: usize, f: impl Fn(usize) -> f64) -> Vec<RawObservation> {
    (0..n)
        .map(|i| RawObservation::new(base_date() + Duration::days(i as i64), f(i)))
        .collect()
}

fn engine_with(region_id: &str, observations: Vec<RawObservation>) -> ForecastEngine<StaticDataSource> {
    ForecastEngine::new(StaticDataSource::new().with_region(region_id, observations))
}

#[test]
fn linear_growth_trend_forecast_is_within_tolerance() {
    // value = 100 + 5 * day_index, 60 days of noiseless history.
    let engine = engine_with("US", daily(60, |i| 100.0 + 5.0 * i as f64));

    let forecast = engine.forecast_trend("US", 10).unwrap();
    assert_eq!(forecast.horizon(), 10);

    for (step, value) in forecast.future_values().iter().enumerate() {
        let expected = 100.0 + 5.0 * (60 + step) as f64;
        let tolerance = 0.05 * expected;
        assert!(
            (value - expected).abs() <= tolerance,
            "step {}: forecast {} not within 5% of {}",
            step,
            value,
            expected
        );
    }
}

#[test]
fn comparison_aligns_future_dates_between_models() {
    let engine = engine_with(
        "US",
        daily(120, |i| 300.0 + 2.0 * i as f64 + 20.0 * ((i % 7) as f64)),
    );

    let bundle = engine.compare_models("US", DEFAULT_HORIZON).unwrap();

    assert_eq!(bundle.trend.future_dates(), bundle.ensemble.future_dates());
    assert_eq!(bundle.trend.horizon(), DEFAULT_HORIZON);
    assert_eq!(
        bundle.trend.future_dates()[0],
        bundle.historical.last_date() + Duration::days(1)
    );
}

#[test]
fn holdout_metrics_satisfy_rmse_mae_ordering() {
    // Noisy-ish deterministic series so errors are non-degenerate.
    let engine = engine_with(
        "US",
        daily(100, |i| 500.0 + 3.0 * i as f64 + jitter(i)),
    );

    for kind in [ForecasterKind::Trend, ForecasterKind::Ensemble] {
        let metrics = engine.evaluate("US", kind, 14).unwrap();
        assert!(metrics.mae >= 0.0);
        assert!(metrics.rmse >= 0.0);
        assert!(
            metrics.rmse >= metrics.mae - 1e-9,
            "{:?}: rmse {} < mae {}",
            kind,
            metrics.rmse,
            metrics.mae
        );
    }
}

// Deterministic pseudo-variation without pulling in an RNG.
fn jitter(i: usize) -> f64 {
    ((i * 7919 + 13) % 101) as f64
}

#[test]
fn single_point_history_is_insufficient() {
    let engine = engine_with("TV", daily(1, |_| 42.0));

    let result = engine.forecast_trend("TV", 10);
    assert_eq!(
        result.unwrap_err(),
        ForecastError::InsufficientData { needed: 2, got: 1 }
    );
}

#[test]
fn five_day_history_fails_the_forest_with_model_fit() {
    let engine = engine_with("SM", daily(5, |i| 10.0 + i as f64));

    let result = engine.forecast_ensemble("SM", 10);
    assert!(matches!(
        result,
        Err(ForecastError::ModelFit {
            model: "RandomForest",
            ..
        })
    ));
}

#[test]
fn unknown_region_surfaces_invalid_region() {
    let engine = engine_with("US", daily(60, |i| i as f64));

    let result = engine.compare_models("Atlantis", DEFAULT_HORIZON);
    assert_eq!(
        result.unwrap_err(),
        ForecastError::InvalidRegion("Atlantis".to_string())
    );
}

#[test]
fn messy_feed_normalizes_to_contiguous_history() {
    // Unordered, with a duplicate (corrected) date and a gap.
    let observations = vec![
        RawObservation::new(base_date() + Duration::days(4), 50.0),
        RawObservation::new(base_date(), 10.0),
        RawObservation::new(base_date() + Duration::days(1), 18.0),
        RawObservation::new(base_date() + Duration::days(1), 20.0),
    ];
    let engine = engine_with("US", observations);

    let series = engine.history("US").unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(series.values(), &[10.0, 20.0, 30.0, 40.0, 50.0]);
    assert_eq!(series.smoothed().len(), 5);
}

#[test]
fn insights_report_growth_and_direction() {
    let engine = engine_with("US", daily(90, |i| 100.0 + 5.0 * i as f64));

    let insights = engine.insights("US", 30).unwrap();

    assert_eq!(insights.days_observed, 90);
    assert_relative_eq!(insights.latest_value, 100.0 + 5.0 * 89.0);
    assert_relative_eq!(insights.peak_value, insights.latest_value);
    assert_eq!(insights.trend, TrendDirection::Rising);
    // A steadily growing series projects further growth.
    assert!(insights.projected_growth_pct.unwrap() > 0.0);
    assert!(insights.projected_value > insights.latest_value);
}
