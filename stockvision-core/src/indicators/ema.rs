//! Exponential Moving Average (EMA), bias-adjusted.
//!
//! alpha = 2 / (span + 1). Each output is the weighted mean of all inputs so
//! far with weights (1 - alpha)^k for the value k steps back:
//!
//! EMA[t] = sum_k w_k * x[t-k] / sum_k w_k
//!
//! This is the `adjust=True` form, so early values are not pulled toward the
//! first observation. Non-finite inputs are skipped but still age the weights.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }

    pub fn alpha(&self) -> f64 {
        2.0 / (self.span as f64 + 1.0)
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let decay = 1.0 - self.alpha();
        let mut num = 0.0;
        let mut den = 0.0;

        values
            .iter()
            .map(|&v| {
                num *= decay;
                den *= decay;
                if v.is_finite() {
                    num += v;
                    den += 1.0;
                }
                if den > 0.0 {
                    num / den
                } else {
                    f64::NAN
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_span_1_equals_input() {
        let result = Ema::new(1).compute(&[100.0, 200.0, 300.0]);
        for (r, e) in result.iter().zip([100.0, 200.0, 300.0]) {
            assert_approx(*r, e, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ema_3_adjusted_values() {
        // alpha = 0.5, decay = 0.5
        // t0: 10
        // t1: (20 + 0.5*10) / 1.5 = 16.666..
        // t2: (30 + 0.5*20 + 0.25*10) / 1.75 = 24.2857..
        let result = Ema::new(3).compute(&[10.0, 20.0, 30.0]);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 25.0 / 1.5, DEFAULT_EPSILON);
        assert_approx(result[2], 42.5 / 1.75, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_constant_series_is_constant() {
        let result = Ema::new(20).compute(&[42.0; 30]);
        assert!(result.iter().all(|v| (v - 42.0).abs() < DEFAULT_EPSILON));
    }

    #[test]
    fn ema_leading_nan_then_values() {
        let result = Ema::new(3).compute(&[f64::NAN, 10.0, 20.0]);
        assert!(result[0].is_nan());
        assert_approx(result[1], 10.0, DEFAULT_EPSILON);
        assert_approx(result[2], 25.0 / 1.5, DEFAULT_EPSILON);
    }

    #[test]
    fn shorter_span_tracks_faster() {
        let mut values = vec![100.0; 20];
        values.extend(std::iter::repeat(110.0).take(5));
        let fast = Ema::new(5).compute(&values);
        let slow = Ema::new(20).compute(&values);
        assert!(fast[24] > slow[24]);
    }
}
