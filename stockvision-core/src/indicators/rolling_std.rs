//! Rolling sample standard deviation (n - 1 denominator).
//!
//! Computed over the finite values among the last `period` inputs. A window
//! with fewer than two finite values is NaN.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct RollingStd {
    period: usize,
    name: String,
}

impl RollingStd {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "rolling std period must be >= 2");
        Self {
            period,
            name: format!("std_{period}"),
        }
    }
}

impl Indicator for RollingStd {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        (0..values.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(self.period);
                let window: Vec<f64> = values[start..=i]
                    .iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .collect();
                if window.len() < 2 {
                    return f64::NAN;
                }
                let n = window.len() as f64;
                let mean = window.iter().sum::<f64>() / n;
                let var = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
                var.sqrt()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn first_value_is_nan() {
        let result = RollingStd::new(14).compute(&[0.01, 0.02]);
        assert!(result[0].is_nan());
    }

    #[test]
    fn sample_std_known_values() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: sample variance = 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let result = RollingStd::new(8).compute(&values);
        assert_approx(result[7], (32.0_f64 / 7.0).sqrt(), DEFAULT_EPSILON);
        // [2, 4]: mean 3, variance 2
        assert_approx(result[1], 2.0_f64.sqrt(), DEFAULT_EPSILON);
    }

    #[test]
    fn window_rolls() {
        let result = RollingStd::new(2).compute(&[1.0, 1.0, 5.0, 5.0]);
        assert_approx(result[1], 0.0, DEFAULT_EPSILON);
        assert_approx(result[2], 8.0_f64.sqrt(), DEFAULT_EPSILON);
        assert_approx(result[3], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn constant_series_has_zero_std() {
        let result = RollingStd::new(14).compute(&[0.5; 20]);
        assert!(result[1..].iter().all(|v| v.abs() < DEFAULT_EPSILON));
    }
}
