//! Forecasting models.

mod traits;

pub mod forest;
pub mod trend;

pub use forest::{ForestConfig, RandomForest};
pub use traits::{BoxedForecaster, Forecaster, ForecasterKind};
pub use trend::TrendSeasonal;
