//! # epiforecast
//!
//! Regional case-count forecasting and model comparison.
//!
//! The engine normalizes a raw per-region history (duplicate dates, gaps,
//! unordered input) into a gap-free daily series with a 7-day smoothed view,
//! forecasts it with two independent model families (an additive trend +
//! weekly-seasonality model and a bagged regression-tree ensemble over lag
//! and calendar features), and scores both against a held-out trailing
//! window so callers can judge which model performs better per region.
//!
//! Everything is synchronous, CPU-bound, and freshly derived per call; a
//! host may parallelize across regions without shared state.
//!
//! ```
//! use chrono::{Duration, NaiveDate};
//! use epiforecast::prelude::*;
//!
//! let base = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
//! let history: Vec<_> = (0..90)
//!     .map(|i| RawObservation::new(base + Duration::days(i), 100.0 + 5.0 * i as f64))
//!     .collect();
//!
//! let engine = ForecastEngine::new(StaticDataSource::new().with_region("US", history));
//! let bundle = engine.compare_models("US", DEFAULT_HORIZON).unwrap();
//!
//! assert_eq!(bundle.trend.future_dates(), bundle.ensemble.future_dates());
//! assert!(bundle.trend.metrics().is_some());
//! ```

pub mod compare;
pub mod core;
pub mod engine;
pub mod error;
pub mod insights;
pub mod models;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::compare::{compare_models, ComparisonBundle};
    pub use crate::core::{DailySeries, ForecastResult, RawObservation};
    pub use crate::engine::{ForecastEngine, RegionDataSource, StaticDataSource, DEFAULT_HORIZON};
    pub use crate::error::{ForecastError, Result};
    pub use crate::insights::{RegionInsights, TrendDirection};
    pub use crate::models::{Forecaster, ForecasterKind};
    pub use crate::utils::{calculate_metrics, Metrics};
}
