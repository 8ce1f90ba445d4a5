//! Error types for the epiforecast library.

use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while normalizing, fitting, or comparing.
///
/// All variants are recoverable-by-caller conditions: given the same input
/// the same error recurs, so retrying inside the engine is never useful.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Not enough history for the requested operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Enough raw data, but a model's minimum-sample requirement is unmet.
    #[error("{model} requires at least {needed} observations, got {got}")]
    ModelFit {
        model: &'static str,
        needed: usize,
        got: usize,
    },

    /// The data source does not know the region identifier.
    #[error("unknown region: {0}")]
    InvalidRegion(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Dimension mismatch between index-aligned sequences.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
