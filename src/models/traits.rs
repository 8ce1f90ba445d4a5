//! Forecaster trait shared by both model families.

use crate::core::{DailySeries, ForecastResult};
use crate::error::Result;
use crate::models::forest::RandomForest;
use crate::models::trend::TrendSeasonal;

/// Common interface for the engine's forecasting models.
///
/// Object-safe, so the evaluator and orchestrator are written once against
/// `Box<dyn Forecaster>` rather than per model family.
pub trait Forecaster {
    /// Fit the model to a normalized daily series.
    fn fit(&mut self, series: &DailySeries) -> Result<()>;

    /// Forecast `horizon` days past the fitted history.
    ///
    /// The result carries contiguous future dates starting the day after
    /// the last fitted date, and no metrics.
    fn predict(&self, horizon: usize) -> Result<ForecastResult>;

    /// Display name of the model.
    fn name(&self) -> &str;

    /// Whether `fit` has succeeded.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;

/// The two model families the engine compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecasterKind {
    /// Additive trend + weekly seasonality fit by least squares.
    Trend,
    /// Bagged regression-tree ensemble over lag and calendar features.
    Ensemble,
}

impl ForecasterKind {
    /// Create a fresh model with default hyperparameters.
    pub fn create(self) -> BoxedForecaster {
        match self {
            ForecasterKind::Trend => Box::new(TrendSeasonal::new()),
            ForecasterKind::Ensemble => Box::new(RandomForest::new()),
        }
    }
}
