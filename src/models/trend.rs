//! Trend-extrapolation model with weekly seasonality.

use crate::core::{DailySeries, ForecastResult};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::lsq::least_squares;
use chrono::{Datelike, Duration, NaiveDate};

/// Minimum history needed to estimate a slope and six weekday effects.
const MIN_HISTORY: usize = 14;

/// Weekday indicator columns; Monday is the baseline.
const WEEKDAY_DUMMIES: usize = 6;

/// Additive trend + day-of-week model fit by least squares.
///
/// Decomposes the series into a linear long-run trend over elapsed days and
/// a weekly seasonal effect from day-of-week indicators, then extrapolates
/// the trend past the last observed date and re-adds the effect of each
/// future date's weekday. Forecast values are floored at 0.
#[derive(Debug, Clone, Default)]
pub struct TrendSeasonal {
    /// `[intercept, slope, tue..sun effects]` once fitted.
    coefficients: Option<Vec<f64>>,
    last_date: Option<NaiveDate>,
    train_len: usize,
}

impl TrendSeasonal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weekday effect for a Monday-based weekday index.
    fn weekday_effect(&self, beta: &[f64], weekday: usize) -> f64 {
        if weekday == 0 {
            0.0
        } else {
            beta[1 + weekday]
        }
    }
}

impl Forecaster for TrendSeasonal {
    fn fit(&mut self, series: &DailySeries) -> Result<()> {
        let n = series.len();
        if n < MIN_HISTORY {
            return Err(ForecastError::ModelFit {
                model: "TrendSeasonal",
                needed: MIN_HISTORY,
                got: n,
            });
        }

        // Design: elapsed-day index plus one indicator per non-Monday weekday.
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(n); 1 + WEEKDAY_DUMMIES];
        for (i, date) in series.dates().iter().enumerate() {
            columns[0].push(i as f64);
            let weekday = date.weekday().num_days_from_monday() as usize;
            for dummy in 1..=WEEKDAY_DUMMIES {
                columns[dummy].push(if weekday == dummy { 1.0 } else { 0.0 });
            }
        }

        let beta = least_squares(series.values(), &columns)?;

        self.coefficients = Some(beta);
        self.last_date = Some(series.last_date());
        self.train_len = n;
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<ForecastResult> {
        let beta = self.coefficients.as_ref().ok_or(ForecastError::FitRequired)?;
        let last_date = self.last_date.ok_or(ForecastError::FitRequired)?;

        let mut dates = Vec::with_capacity(horizon);
        let mut values = Vec::with_capacity(horizon);
        for h in 1..=horizon {
            let date = last_date + Duration::days(h as i64);
            let t = (self.train_len - 1 + h) as f64;
            let weekday = date.weekday().num_days_from_monday() as usize;
            let value = beta[0] + beta[1] * t + self.weekday_effect(beta, weekday);
            dates.push(date);
            // Case counts cannot go negative.
            values.push(value.max(0.0));
        }

        ForecastResult::new(dates, values)
    }

    fn name(&self) -> &str {
        "TrendSeasonal"
    }

    fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }
}
