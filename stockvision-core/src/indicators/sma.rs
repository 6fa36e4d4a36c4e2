//! Simple Moving Average (SMA) with an expanding start.
//!
//! SMA[t] = mean of the finite values among the last `period` inputs.
//! The first `period - 1` outputs average however many values exist so far,
//! so there is no warmup. A window with no finite values is NaN.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("ma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        let mut result = Vec::with_capacity(values.len());

        for (i, &v) in values.iter().enumerate() {
            if v.is_finite() {
                sum += v;
                count += 1;
            }
            if i >= self.period {
                let leaving = values[i - self.period];
                if leaving.is_finite() {
                    sum -= leaving;
                    count -= 1;
                }
            }
            result.push(if count == 0 { f64::NAN } else { sum / count as f64 });
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_expanding_start() {
        let result = Sma::new(3).compute(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 15.0, DEFAULT_EPSILON);
        assert_approx(result[2], 20.0, DEFAULT_EPSILON);
        assert_approx(result[3], 30.0, DEFAULT_EPSILON);
        assert_approx(result[4], 40.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_identity() {
        let result = Sma::new(1).compute(&[100.0, 200.0, 300.0]);
        assert_eq!(result, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn sma_skips_nan() {
        let result = Sma::new(3).compute(&[10.0, f64::NAN, 14.0, 16.0, 18.0]);
        assert_approx(result[1], 10.0, DEFAULT_EPSILON);
        assert_approx(result[2], 12.0, DEFAULT_EPSILON);
        // window [NaN, 14, 16]
        assert_approx(result[3], 15.0, DEFAULT_EPSILON);
        assert_approx(result[4], 16.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_all_nan_window_is_nan() {
        let result = Sma::new(2).compute(&[f64::NAN, f64::NAN, 4.0]);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_name() {
        assert_eq!(Sma::new(14).name(), "ma_14");
    }
}
