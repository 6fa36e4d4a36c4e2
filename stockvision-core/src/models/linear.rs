//! Linear regression forecaster.
//!
//! Fits `price ~ day_index + ma_7 + ma_14 + momentum_5` by OLS, then walks
//! forward holding the moving averages at their last values while momentum
//! decays. Each step gets multiplicative Gaussian noise (sd 0.5% of price).

use super::metrics::{mae, r_squared, rmse};
use super::ols::OlsFit;
use super::{assemble, bounded_horizon, empty_result, finite_or_mean, future_date};
use crate::domain::{round2, ForecastResult, PredictionPoint};
use crate::features::{FeatureFrame, FeatureRow};
use rand::Rng;
use rand_distr::StandardNormal;

pub const CONFIDENCE_MIN: f64 = 0.3;
pub const CONFIDENCE_MAX: f64 = 0.95;

const NOISE_SD: f64 = 0.005;
const MOMENTUM_DAMPING: f64 = 0.95;
const MOMENTUM_DECAY: f64 = 0.98;

fn design_row(row: &FeatureRow) -> Vec<f64> {
    [row.day_index as f64, row.ma_7, row.ma_14, row.momentum_5]
        .into_iter()
        .map(|v| if v.is_finite() { v } else { 0.0 })
        .collect()
}

pub fn forecast<R: Rng + ?Sized>(
    frame: &FeatureFrame,
    horizon_days: usize,
    rng: &mut R,
) -> ForecastResult {
    let Some(last) = frame.last() else {
        return empty_result(CONFIDENCE_MIN);
    };

    let x: Vec<Vec<f64>> = frame.rows().iter().map(design_row).collect();
    let y = finite_or_mean(&frame.prices());
    let model = OlsFit::fit(&x, &y);

    let fitted: Vec<f64> = x.iter().map(|row| model.predict(row)).collect();
    let confidence = r_squared(&y, &fitted).clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);

    let mut momentum = if last.momentum_5.is_finite() {
        last.momentum_5
    } else {
        0.0
    };
    let last_x = design_row(last);
    let horizon_days = bounded_horizon(horizon_days);
    let mut predictions: Vec<PredictionPoint> = Vec::with_capacity(horizon_days);
    for i in 1..=horizon_days {
        let Some(date) = future_date(last.date, i) else {
            break;
        };
        let features = [
            (last.day_index + i) as f64,
            last_x[1],
            last_x[2],
            momentum * MOMENTUM_DAMPING,
        ];
        let mut price = model.predict(&features);
        let z: f64 = rng.sample(StandardNormal);
        price += z * NOISE_SD * price;

        predictions.push(PredictionPoint {
            date,
            price: round2(price),
        });
        momentum *= MOMENTUM_DECAY;
    }

    let last_price = y[y.len() - 1];
    assemble(
        predictions,
        last_price,
        mae(&y, &fitted),
        rmse(&y, &fitted),
        confidence,
    )
}
