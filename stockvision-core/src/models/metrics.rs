//! In-sample error metrics.

/// Mean absolute error. 0 for empty input.
pub fn mae(actual: &[f64], fitted: &[f64]) -> f64 {
    let n = actual.len().min(fitted.len());
    if n == 0 {
        return 0.0;
    }
    actual
        .iter()
        .zip(fitted)
        .map(|(a, f)| (a - f).abs())
        .sum::<f64>()
        / n as f64
}

/// Root mean squared error. 0 for empty input.
pub fn rmse(actual: &[f64], fitted: &[f64]) -> f64 {
    let n = actual.len().min(fitted.len());
    if n == 0 {
        return 0.0;
    }
    let mse = actual
        .iter()
        .zip(fitted)
        .map(|(a, f)| (a - f).powi(2))
        .sum::<f64>()
        / n as f64;
    mse.sqrt()
}

/// Coefficient of determination.
///
/// A constant target scores 1 when fitted exactly and 0 otherwise.
pub fn r_squared(actual: &[f64], fitted: &[f64]) -> f64 {
    let n = actual.len().min(fitted.len());
    if n == 0 {
        return 0.0;
    }
    let mean = actual.iter().take(n).sum::<f64>() / n as f64;
    let ss_res: f64 = actual
        .iter()
        .zip(fitted)
        .map(|(a, f)| (a - f).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().take(n).map(|a| (a - mean).powi(2)).sum();

    if ss_tot <= f64::EPSILON * mean.abs().max(1.0) {
        return if ss_res <= f64::EPSILON * mean.abs().max(1.0) {
            1.0
        } else {
            0.0
        };
    }
    1.0 - ss_res / ss_tot
}

/// Population standard deviation (n denominator). 0 for empty input.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}
