//! Ordinary least squares with an intercept.
//!
//! Columns are standardized and the normal equations `Z'Z b = Z'y` are built
//! with `ndarray`, then solved through an SVD pseudo-inverse. Singular values
//! below the tolerance are dropped, so collinear columns share a minimum-norm
//! solution instead of making the system singular. A column with zero
//! variance gets an exact zero coefficient.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

/// Relative singular value below which a direction counts as degenerate.
const SINGULAR_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl OlsFit {
    pub fn predict(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(b, v)| b * v)
                .sum::<f64>()
    }

    /// Fit `y ~ 1 + X`. `x` is row-major; every row has the same width.
    ///
    /// Empty input fits a zero model.
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> Self {
        let n = x.len().min(y.len());
        let width = x.first().map_or(0, Vec::len);
        if n == 0 {
            return Self {
                intercept: 0.0,
                coefficients: vec![0.0; width],
            };
        }
        let nf = n as f64;
        let y_mean = y[..n].iter().sum::<f64>() / nf;
        if width == 0 {
            return Self {
                intercept: y_mean,
                coefficients: Vec::new(),
            };
        }

        let raw = Array2::from_shape_fn((n, width), |(i, j)| x[i][j]);
        let means = raw.sum_axis(ndarray::Axis(0)) / nf;
        let scales: Vec<f64> = (0..width)
            .map(|j| {
                let var = raw
                    .column(j)
                    .iter()
                    .map(|v| (v - means[j]).powi(2))
                    .sum::<f64>()
                    / nf;
                var.sqrt()
            })
            .collect();
        let active: Vec<bool> = (0..width)
            .map(|j| scales[j] > f64::EPSILON * means[j].abs().max(1.0))
            .collect();

        let z = Array2::from_shape_fn((n, width), |(i, j)| {
            if active[j] {
                (raw[[i, j]] - means[j]) / scales[j]
            } else {
                0.0
            }
        });
        let centered: Array1<f64> = y[..n].iter().map(|v| v - y_mean).collect();

        let ztz = z.t().dot(&z);
        let zty = z.t().dot(&centered);
        let standardized = solve(&ztz, &zty, SINGULAR_TOLERANCE * nf);

        let coefficients: Vec<f64> = (0..width)
            .map(|j| if active[j] { standardized[j] / scales[j] } else { 0.0 })
            .collect();
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(means.iter())
                .map(|(b, m)| b * m)
                .sum::<f64>();

        Self {
            intercept,
            coefficients,
        }
    }
}

/// Minimum-norm solution of the square system `a b = rhs`. Directions with a
/// singular value at or below `tolerance` contribute nothing.
fn solve(a: &Array2<f64>, rhs: &Array1<f64>, tolerance: f64) -> Vec<f64> {
    let width = rhs.len();
    let a = DMatrix::from_row_iterator(width, width, a.iter().copied());
    let rhs = DVector::from_iterator(width, rhs.iter().copied());
    match a.svd(true, true).solve(&rhs, tolerance) {
        Ok(solution) if solution.iter().all(|v| v.is_finite()) => solution.iter().copied().collect(),
        _ => vec![0.0; width],
    }
}
