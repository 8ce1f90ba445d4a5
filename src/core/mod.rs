//! Core data structures: normalized series and forecast results.

mod forecast;
mod series;

pub use forecast::ForecastResult;
pub use series::{DailySeries, RawObservation, SMOOTHING_WINDOW};
