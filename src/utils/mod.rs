//! Regression, metrics, and evaluation helpers.

pub mod holdout;
pub mod lsq;
pub mod metrics;

pub use holdout::holdout_metrics;
pub use lsq::least_squares;
pub use metrics::{calculate_metrics, Metrics};
