//! Accuracy metrics for held-out forecast evaluation.

use crate::error::{ForecastError, Result};

/// Point-forecast accuracy on a held-out window.
///
/// `rmse >= mae` for any error distribution, with equality only when all
/// absolute errors are identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
}

/// Calculate accuracy metrics between held-out actuals and predictions.
///
/// The two slices must be day-aligned and equal in length.
pub fn calculate_metrics(actual: &[f64], predicted: &[f64]) -> Result<Metrics> {
    if actual.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let n = actual.len() as f64;

    let mae = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    let mse = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n;

    Ok(Metrics {
        mae,
        rmse: mse.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_prediction_scores_zero() {
        let actual = vec![1.0, 2.0, 3.0];
        let metrics = calculate_metrics(&actual, &actual).unwrap();

        assert_relative_eq!(metrics.mae, 0.0);
        assert_relative_eq!(metrics.rmse, 0.0);
    }

    #[test]
    fn known_errors_produce_known_scores() {
        let actual = vec![10.0, 10.0, 10.0, 10.0];
        let predicted = vec![11.0, 9.0, 13.0, 7.0];

        let metrics = calculate_metrics(&actual, &predicted).unwrap();

        // Absolute errors 1, 1, 3, 3.
        assert_relative_eq!(metrics.mae, 2.0);
        assert_relative_eq!(metrics.rmse, (20.0_f64 / 4.0).sqrt());
    }

    #[test]
    fn rmse_dominates_mae_for_uneven_errors() {
        let actual = vec![0.0, 0.0, 0.0];
        let predicted = vec![0.0, 0.0, 9.0];

        let metrics = calculate_metrics(&actual, &predicted).unwrap();
        assert!(metrics.rmse > metrics.mae);
    }

    #[test]
    fn uniform_errors_make_rmse_equal_mae() {
        let actual = vec![5.0, 5.0, 5.0];
        let predicted = vec![7.0, 3.0, 7.0];

        let metrics = calculate_metrics(&actual, &predicted).unwrap();
        assert_relative_eq!(metrics.rmse, metrics.mae);
    }

    #[test]
    fn empty_and_misaligned_inputs_are_rejected() {
        assert!(matches!(
            calculate_metrics(&[], &[]),
            Err(ForecastError::InsufficientData { .. })
        ));
        assert_eq!(
            calculate_metrics(&[1.0, 2.0], &[1.0]).unwrap_err(),
            ForecastError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        );
    }
}
