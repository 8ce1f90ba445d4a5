//! Region-level summary derived from history and forecast.

use crate::core::{DailySeries, ForecastResult, SMOOTHING_WINDOW};

/// Direction of the trailing 7-day mean over the past week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Rising,
    Falling,
}

/// Headline numbers for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionInsights {
    /// Latest observed count.
    pub latest_value: f64,
    /// Forecast value at the end of the horizon.
    pub projected_value: f64,
    /// Growth from latest to projected, in percent. `None` when the latest
    /// observed value is 0.
    pub projected_growth_pct: Option<f64>,
    /// Direction of the smoothed series over the past week.
    pub trend: TrendDirection,
    /// Magnitude of the smoothed change, in percent. `None` when the
    /// week-ago mean is 0.
    pub trend_change_pct: Option<f64>,
    /// Highest observed count.
    pub peak_value: f64,
    /// Days of available history.
    pub days_observed: usize,
}

/// Summarize a region from its normalized history and a forecast.
///
/// The trend direction compares the current 7-day mean against the mean one
/// week earlier; a series shorter than 8 days reads as `Falling` with no
/// change percent, since there is no earlier week to compare against.
pub fn summarize(series: &DailySeries, forecast: &ForecastResult) -> RegionInsights {
    let values = series.values();
    let smoothed = series.smoothed();

    let latest_value = series.last_value();
    let projected_value = forecast
        .future_values()
        .last()
        .copied()
        .unwrap_or(latest_value);
    let projected_growth_pct =
        (latest_value > 0.0).then(|| (projected_value - latest_value) / latest_value * 100.0);

    let current_mean = smoothed[smoothed.len() - 1];
    let previous_mean = if smoothed.len() > SMOOTHING_WINDOW {
        smoothed[smoothed.len() - 1 - SMOOTHING_WINDOW]
    } else {
        current_mean
    };
    let trend = if current_mean > previous_mean {
        TrendDirection::Rising
    } else {
        TrendDirection::Falling
    };
    let trend_change_pct = (previous_mean > 0.0)
        .then(|| ((current_mean - previous_mean) / previous_mean * 100.0).abs());

    let peak_value = values.iter().copied().fold(0.0, f64::max);

    RegionInsights {
        latest_value,
        projected_value,
        projected_growth_pct,
        trend,
        trend_change_pct,
        peak_value,
        days_observed: series.len(),
    }
}
