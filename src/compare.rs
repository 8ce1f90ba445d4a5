//! Side-by-side comparison of the two model families.

use crate::core::{DailySeries, ForecastResult};
use crate::error::Result;
use crate::models::{Forecaster, ForecasterKind};
use crate::utils::holdout::holdout_metrics;

/// Everything a caller needs to judge the two models side by side.
///
/// Both forecasts span identical future dates, so consumers can align them
/// positionally without re-checking. A fresh value object per request;
/// nothing is shared between regions or calls.
#[derive(Debug, Clone)]
pub struct ComparisonBundle {
    /// The normalized history both models were fit on.
    pub historical: DailySeries,
    /// Trend-extrapolation forecast with holdout metrics.
    pub trend: ForecastResult,
    /// Regression-ensemble forecast with holdout metrics.
    pub ensemble: ForecastResult,
}

/// Fit a fresh model of the given kind on the full series and forecast.
pub fn forecast_full(
    series: &DailySeries,
    kind: ForecasterKind,
    horizon: usize,
) -> Result<ForecastResult> {
    let mut model = kind.create();
    model.fit(series)?;
    model.predict(horizon)
}

/// Run both model families over one normalized series.
///
/// Holdout metrics come from the trailing-window split; the production
/// forecasts are fit on the full series. If either model cannot be fit or
/// evaluated, the whole comparison fails; a one-sided comparison is
/// misleading, so no partial bundle is ever returned.
pub fn compare_models(series: &DailySeries, horizon: usize) -> Result<ComparisonBundle> {
    let trend_metrics = holdout_metrics(series, ForecasterKind::Trend, horizon)?;
    let ensemble_metrics = holdout_metrics(series, ForecasterKind::Ensemble, horizon)?;

    let trend =
        forecast_full(series, ForecasterKind::Trend, horizon)?.with_metrics(trend_metrics);
    let ensemble =
        forecast_full(series, ForecasterKind::Ensemble, horizon)?.with_metrics(ensemble_metrics);

    Ok(ComparisonBundle {
        historical: series.clone(),
        trend,
        ensemble,
    })
}
