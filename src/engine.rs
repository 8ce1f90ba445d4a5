//! Entry points binding the data-access seam to the forecasting core.

use crate::compare::{self, ComparisonBundle};
use crate::core::{DailySeries, ForecastResult, RawObservation};
use crate::error::{ForecastError, Result};
use crate::insights::{summarize, RegionInsights};
use crate::models::ForecasterKind;
use crate::utils::holdout::holdout_metrics;
use crate::utils::metrics::Metrics;
use std::collections::HashMap;

/// Default forecast horizon, in days.
pub const DEFAULT_HORIZON: usize = 30;

/// Source of raw per-region history.
///
/// Implementations own acquisition, caching, and any upstream retries; the
/// engine only requires that a known region yields its observations and an
/// unknown one yields `InvalidRegion`.
pub trait RegionDataSource {
    fn region_history(&self, region_id: &str) -> Result<Vec<RawObservation>>;
}

/// In-memory data source, for tests and direct embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    regions: HashMap<String, Vec<RawObservation>>,
}

impl StaticDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region_id: &str, observations: Vec<RawObservation>) -> Self {
        self.regions.insert(region_id.to_string(), observations);
        self
    }

    pub fn region_ids(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}

impl RegionDataSource for StaticDataSource {
    fn region_history(&self, region_id: &str) -> Result<Vec<RawObservation>> {
        self.regions
            .get(region_id)
            .cloned()
            .ok_or_else(|| ForecastError::InvalidRegion(region_id.to_string()))
    }
}

/// Forecasting and model-comparison engine over a region data source.
///
/// Every call re-derives its working set from the source's current history;
/// nothing is shared between calls, so a host may run regions (and the two
/// model pipelines within one region) in parallel freely.
pub struct ForecastEngine<D> {
    source: D,
}

impl<D: RegionDataSource> ForecastEngine<D> {
    pub fn new(source: D) -> Self {
        Self { source }
    }

    /// Normalized daily history with the 7-day smoothed companion.
    pub fn history(&self, region_id: &str) -> Result<DailySeries> {
        let observations = self.source.region_history(region_id)?;
        DailySeries::from_observations(&observations)
    }

    /// Trend-extrapolation forecast; no metrics attached.
    pub fn forecast_trend(&self, region_id: &str, horizon: usize) -> Result<ForecastResult> {
        let series = self.history(region_id)?;
        compare::forecast_full(&series, ForecasterKind::Trend, horizon)
    }

    /// Regression-ensemble forecast; no metrics attached.
    pub fn forecast_ensemble(&self, region_id: &str, horizon: usize) -> Result<ForecastResult> {
        let series = self.history(region_id)?;
        compare::forecast_full(&series, ForecasterKind::Ensemble, horizon)
    }

    /// Held-out accuracy of one model family on the region's history.
    pub fn evaluate(
        &self,
        region_id: &str,
        kind: ForecasterKind,
        horizon: usize,
    ) -> Result<Metrics> {
        let series = self.history(region_id)?;
        holdout_metrics(&series, kind, horizon)
    }

    /// Full side-by-side comparison with per-model holdout metrics.
    pub fn compare_models(&self, region_id: &str, horizon: usize) -> Result<ComparisonBundle> {
        let series = self.history(region_id)?;
        compare::compare_models(&series, horizon)
    }

    /// Headline summary from history plus the trend forecast.
    pub fn insights(&self, region_id: &str, horizon: usize) -> Result<RegionInsights> {
        let series = self.history(region_id)?;
        let forecast = compare::forecast_full(&series, ForecasterKind::Trend, horizon)?;
        Ok(summarize(&series, &forecast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn observations(n: usize) -> Vec<RawObservation> {
        let base = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        (0..n)
            .map(|i| RawObservation::new(base + Duration::days(i as i64), 100.0 + 5.0 * i as f64))
            .collect()
    }

    fn engine() -> ForecastEngine<StaticDataSource> {
        let source = StaticDataSource::new()
            .with_region("US", observations(90))
            .with_region("DE", observations(1));
        ForecastEngine::new(source)
    }

    #[test]
    fn unknown_region_propagates_invalid_region() {
        let result = engine().forecast_trend("Atlantis", DEFAULT_HORIZON);
        assert_eq!(
            result.unwrap_err(),
            ForecastError::InvalidRegion("Atlantis".to_string())
        );
    }

    #[test]
    fn single_observation_region_is_insufficient() {
        let result = engine().forecast_trend("DE", DEFAULT_HORIZON);
        assert_eq!(
            result.unwrap_err(),
            ForecastError::InsufficientData { needed: 2, got: 1 }
        );
    }

    #[test]
    fn forecast_entry_points_carry_no_metrics() {
        let engine = engine();

        let trend = engine.forecast_trend("US", DEFAULT_HORIZON).unwrap();
        let ensemble = engine.forecast_ensemble("US", DEFAULT_HORIZON).unwrap();

        assert_eq!(trend.horizon(), DEFAULT_HORIZON);
        assert_eq!(ensemble.horizon(), DEFAULT_HORIZON);
        assert!(trend.metrics().is_none());
        assert!(ensemble.metrics().is_none());
    }

    #[test]
    fn evaluate_is_a_standalone_surface() {
        let metrics = engine()
            .evaluate("US", ForecasterKind::Trend, 10)
            .unwrap();
        assert!(metrics.mae >= 0.0);
        assert!(metrics.rmse >= metrics.mae - 1e-9);
    }

    #[test]
    fn comparison_bundle_aligns_both_models() {
        let bundle = engine().compare_models("US", DEFAULT_HORIZON).unwrap();

        assert_eq!(bundle.trend.future_dates(), bundle.ensemble.future_dates());
        assert!(bundle.trend.metrics().is_some());
        assert!(bundle.ensemble.metrics().is_some());
    }

    #[test]
    fn insights_summarize_growing_history() {
        let insights = engine().insights("US", 10).unwrap();

        assert_eq!(insights.days_observed, 90);
        assert_eq!(insights.latest_value, 100.0 + 5.0 * 89.0);
        assert!(insights.projected_growth_pct.unwrap() > 0.0);
    }
}
