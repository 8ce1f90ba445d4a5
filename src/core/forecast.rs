//! Forecast result aligned to future calendar dates.

use crate::error::{ForecastError, Result};
use crate::utils::metrics::Metrics;
use chrono::NaiveDate;

/// Point forecast over a contiguous block of future dates.
///
/// `future_dates` and `future_values` are index-aligned and equal in length;
/// the constructor enforces it so consumers never re-check. `metrics` is
/// present only when a held-out evaluation produced them; production
/// forecasts fit on the full history carry `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    future_dates: Vec<NaiveDate>,
    future_values: Vec<f64>,
    metrics: Option<Metrics>,
}

impl ForecastResult {
    /// Create a forecast from aligned dates and values.
    ///
    /// # Errors
    /// `DimensionMismatch` when the two sequences differ in length.
    pub fn new(future_dates: Vec<NaiveDate>, future_values: Vec<f64>) -> Result<Self> {
        if future_dates.len() != future_values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: future_dates.len(),
                got: future_values.len(),
            });
        }
        Ok(Self {
            future_dates,
            future_values,
            metrics: None,
        })
    }

    /// Attach held-out accuracy metrics.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.future_dates.len()
    }

    pub fn future_dates(&self) -> &[NaiveDate] {
        &self.future_dates
    }

    pub fn future_values(&self) -> &[f64] {
        &self.future_values
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }
}
