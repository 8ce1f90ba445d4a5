//! Normalized daily series for a single region.

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Window of the trailing-mean companion column, in days.
pub const SMOOTHING_WINDOW: usize = 7;

/// One reported count for a region on a calendar date.
///
/// Raw feeds may repeat dates, skip days, or arrive unordered; the
/// normalizer reconciles all of that. `value` is a non-negative count,
/// carried as `f64` so that normalized series (which contain interpolated
/// fractional days) can be fed back through the normalizer unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub value: f64,
}

impl RawObservation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A gap-free daily series with a trailing 7-day mean companion column.
///
/// Exactly one entry per calendar day spanning the observed range, sorted
/// ascending with consecutive dates one day apart. Built only through
/// [`DailySeries::from_observations`], which upholds both invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    smoothed: Vec<f64>,
}

impl DailySeries {
    /// Normalize raw observations into a daily series.
    ///
    /// Duplicate dates collapse to the last-seen value: the upstream feed
    /// issues corrections by re-reporting a date, and the latest report
    /// supersedes. Missing calendar days are filled by linear interpolation
    /// between the nearest known values on each side; the range is anchored
    /// at the earliest and latest known dates, so nothing is extrapolated
    /// beyond them.
    ///
    /// # Errors
    /// `InsufficientData` when fewer than 2 distinct dates are present; a
    /// single point cannot anchor interpolation or any forecaster.
    pub fn from_observations(observations: &[RawObservation]) -> Result<Self> {
        let mut known: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for obs in observations {
            known.insert(obs.date, obs.value);
        }

        if known.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: known.len(),
            });
        }

        let points: Vec<(NaiveDate, f64)> = known.into_iter().collect();
        let span_days = (points[points.len() - 1].0 - points[0].0).num_days() as usize + 1;

        let mut dates = Vec::with_capacity(span_days);
        let mut values = Vec::with_capacity(span_days);

        for pair in points.windows(2) {
            let (start, left) = pair[0];
            let (end, right) = pair[1];
            let gap = (end - start).num_days();
            for offset in 0..gap {
                let t = offset as f64 / gap as f64;
                dates.push(start + Duration::days(offset));
                values.push(left + t * (right - left));
            }
        }
        let (last_date, last_value) = points[points.len() - 1];
        dates.push(last_date);
        values.push(last_value);

        let smoothed = trailing_mean(&values, SMOOTHING_WINDOW);

        Ok(Self {
            dates,
            values,
            smoothed,
        })
    }

    /// Number of daily entries.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false: construction requires at least 2 distinct dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Trailing 7-day mean; the first 6 entries average over a shrinking
    /// window of all available preceding days.
    pub fn smoothed(&self) -> &[f64] {
        &self.smoothed
    }

    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn last_value(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// The first `len` days as a new series, for holdout splitting.
    ///
    /// The smoothed column is a trailing window, so slicing preserves it.
    pub fn prefix(&self, len: usize) -> Result<DailySeries> {
        if len < 2 {
            return Err(ForecastError::InsufficientData { needed: 2, got: len });
        }
        if len > self.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "prefix length {} exceeds series length {}",
                len,
                self.len()
            )));
        }
        Ok(Self {
            dates: self.dates[..len].to_vec(),
            values: self.values[..len].to_vec(),
            smoothed: self.smoothed[..len].to_vec(),
        })
    }

    /// Contiguous future dates starting the day after the last entry.
    pub fn future_dates(&self, horizon: usize) -> Vec<NaiveDate> {
        let last = self.last_date();
        (1..=horizon as i64)
            .map(|h| last + Duration::days(h))
            .collect()
    }

    /// View the series as raw observations (for round-tripping).
    pub fn as_observations(&self) -> Vec<RawObservation> {
        self.dates
            .iter()
            .zip(self.values.iter())
            .map(|(&date, &value)| RawObservation::new(date, value))
            .collect()
    }
}

/// Trailing arithmetic mean with a shrinking window at the start.
fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let seen = &values[start..=i];
        out.push(seen.iter().sum::<f64>() / seen.len() as f64);
    }
    out
}
