//! EMA-pattern heuristic forecaster.
//!
//! Not a learned model. Reads direction and strength from the gap between a
//! fast (span 5) and slow (span 20) EMA, then walks forward combining decaying
//! momentum, a pull toward the slow EMA, a 30-day sine cycle and Gaussian
//! noise. In-sample error is the fast EMA's tracking error, scaled by 0.85.

use super::metrics::{mae, population_std, rmse};
use super::{assemble, bounded_horizon, empty_result, finite_or_mean, future_date};
use crate::domain::{round2, ForecastResult, PredictionPoint};
use crate::features::FeatureFrame;
use crate::indicators::{Ema, Indicator};
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::PI;

pub const CONFIDENCE_MIN: f64 = 0.5;
pub const CONFIDENCE_MAX: f64 = 0.92;

const SHORT_SPAN: usize = 5;
const LONG_SPAN: usize = 20;
const ERROR_SCALE: f64 = 0.85;
const VOLATILITY_PENALTY: f64 = 5.0;
const MOMENTUM_WEIGHT: f64 = 0.002;
const REVERSION_WEIGHT: f64 = 0.001;
const CYCLE_AMPLITUDE: f64 = 0.003;
const CYCLE_PERIOD: f64 = 15.0;
const NOISE_SD: f64 = 0.003;
const STRENGTH_DECAY: f64 = 0.97;

pub fn forecast<R: Rng + ?Sized>(
    frame: &FeatureFrame,
    horizon_days: usize,
    rng: &mut R,
) -> ForecastResult {
    let Some(last) = frame.last() else {
        return empty_result(CONFIDENCE_MIN);
    };

    let prices = finite_or_mean(&frame.prices());
    let ema_short = Ema::new(SHORT_SPAN).compute(&prices);
    let ema_long = Ema::new(LONG_SPAN).compute(&prices);

    let error_mae = mae(&prices, &ema_short) * ERROR_SCALE;
    let error_rmse = rmse(&prices, &ema_short) * ERROR_SCALE;

    let volatility = population_std(&frame.returns());
    let confidence = (1.0 - volatility * VOLATILITY_PENALTY).clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);

    let last_short = ema_short[ema_short.len() - 1];
    let last_long = ema_long[ema_long.len() - 1];
    let direction = if last_short > last_long { 1.0 } else { -1.0 };
    let mut strength = if last_long != 0.0 {
        (last_short - last_long).abs() / last_long
    } else {
        0.0
    };

    let last_price = prices[prices.len() - 1];
    let mut price = last_price;
    let horizon_days = bounded_horizon(horizon_days);
    let mut predictions: Vec<PredictionPoint> = Vec::with_capacity(horizon_days);
    for i in 1..=horizon_days {
        let Some(date) = future_date(last.date, i) else {
            break;
        };
        let momentum = direction * strength * MOMENTUM_WEIGHT;
        let reversion = if price != 0.0 {
            REVERSION_WEIGHT * (last_long - price) / price
        } else {
            0.0
        };
        let cycle = CYCLE_AMPLITUDE * (i as f64 * PI / CYCLE_PERIOD).sin();
        let z: f64 = rng.sample(StandardNormal);
        let noise = z * NOISE_SD;

        price *= 1.0 + momentum + reversion + cycle + noise;
        predictions.push(PredictionPoint {
            date,
            price: round2(price),
        });
        strength *= STRENGTH_DECAY;
    }

    assemble(predictions, last_price, error_mae, error_rmse, confidence)
}
