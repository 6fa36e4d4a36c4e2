//! Rate of Change (ROC) as a fraction.
//!
//! ROC[t] = (x[t] - x[t-period]) / x[t-period]
//! NaN for the first `period` positions, when either value is non-finite, or
//! when the base is zero.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Roc {
    period: usize,
    name: String,
}

impl Roc {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ROC period must be >= 1");
        Self {
            period,
            name: format!("roc_{period}"),
        }
    }
}

impl Indicator for Roc {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![f64::NAN; n];

        for i in self.period..n {
            let prev = values[i - self.period];
            let curr = values[i];
            if prev.is_finite() && curr.is_finite() && prev != 0.0 {
                result[i] = (curr - prev) / prev;
            }
        }

        result
    }
}
