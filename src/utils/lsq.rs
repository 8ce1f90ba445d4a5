//! Least-squares fitting via the normal equations.

use crate::error::{ForecastError, Result};

/// Fit `y = beta[0] + sum_j beta[j+1] * columns[j]` by least squares.
///
/// Builds the normal equations `X'X beta = X'y` with an implicit intercept
/// column and solves them by Cholesky decomposition. A small ridge term on
/// the diagonal keeps near-collinear designs solvable.
///
/// Returns `[intercept, coefficients...]` in column order.
pub fn least_squares(y: &[f64], columns: &[Vec<f64>]) -> Result<Vec<f64>> {
    let n = y.len();
    if n == 0 {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    for column in columns {
        if column.len() != n {
            return Err(ForecastError::DimensionMismatch {
                expected: n,
                got: column.len(),
            });
        }
    }

    let k = columns.len();
    let p = k + 1;

    let mut xtx = vec![vec![0.0; p]; p];
    let mut xty = vec![0.0; p];

    for obs in 0..n {
        xtx[0][0] += 1.0;
        for i in 0..k {
            let xi = columns[i][obs];
            xtx[0][i + 1] += xi;
            xtx[i + 1][0] += xi;
            for j in 0..k {
                xtx[i + 1][j + 1] += xi * columns[j][obs];
            }
        }

        xty[0] += y[obs];
        for i in 0..k {
            xty[i + 1] += columns[i][obs] * y[obs];
        }
    }

    // Ridge stabilization for near-collinear designs.
    for i in 0..p {
        xtx[i][i] += 1e-8;
    }

    solve_symmetric(&xtx, &xty).ok_or_else(|| {
        ForecastError::InvalidParameter(
            "least squares failed: design matrix is not positive definite".into(),
        )
    })
}

/// Solve `A x = b` for symmetric positive definite `A` via Cholesky.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // A = L L'
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
