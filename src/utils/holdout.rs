//! Held-out accuracy evaluation for a single model family.

use crate::core::DailySeries;
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, ForecasterKind};
use crate::utils::metrics::{calculate_metrics, Metrics};

/// Score a model family on the trailing `horizon` days of `series`.
///
/// The series splits at `len - horizon`: the prefix trains a fresh model,
/// and its `horizon`-step forecast is compared day-for-day against the
/// withheld actuals.
///
/// # Errors
/// `InsufficientData` when the series has no room for both a training
/// prefix and the held-out window (`len <= horizon`). A prefix shorter than
/// the model's own minimum surfaces that model's `ModelFit` error unchanged.
pub fn holdout_metrics(
    series: &DailySeries,
    kind: ForecasterKind,
    horizon: usize,
) -> Result<Metrics> {
    if horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "horizon must be positive".into(),
        ));
    }

    let n = series.len();
    if n <= horizon {
        return Err(ForecastError::InsufficientData {
            needed: horizon + 1,
            got: n,
        });
    }

    let train = series.prefix(n - horizon)?;
    let mut model = kind.create();
    model.fit(&train)?;
    let forecast = model.predict(horizon)?;

    let actual = &series.values()[n - horizon..];
    calculate_metrics(actual, forecast.future_values())
}
