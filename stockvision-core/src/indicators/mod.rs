//! Single-series indicators used by the feature engineer.
//!
//! Indicators are pure functions: a price (or return) series in, a numeric
//! series of the same length out. Positions where the indicator is undefined
//! are `f64::NAN`; the feature engineer decides what neutral value replaces
//! them.

pub mod ema;
pub mod roc;
pub mod rolling_std;
pub mod sma;

pub use ema::Ema;
pub use roc::Roc;
pub use rolling_std::RollingStd;
pub use sma::Sma;

/// Trait for indicators over one `f64` series.
///
/// # Look-ahead contamination guard
/// No output at index t may depend on input at t+1 or later. Every indicator
/// must pass the truncated-vs-full series test below.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ma_7", "momentum_5").
    fn name(&self) -> &str;

    /// Compute the indicator over the whole series.
    fn compute(&self, values: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
