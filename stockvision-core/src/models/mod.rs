//! Forecast models.
//!
//! The model set is closed: `ModelKind` dispatches to one of two pure
//! functions `(frame, horizon, rng) -> ForecastResult`. Noise is drawn only
//! from the RNG passed in, so a fixed seed reproduces a forecast exactly.

pub mod ema_pattern;
pub mod linear;
pub mod metrics;
pub mod ols;

use crate::domain::{round2, ForecastResult, PredictionPoint, Trend};
use crate::features::FeatureFrame;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LinearRegression,
    Heuristic,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "linear_regression",
            ModelKind::Heuristic => "heuristic",
        }
    }

    /// Lowest confidence the model reports.
    pub fn confidence_floor(&self) -> f64 {
        match self {
            ModelKind::LinearRegression => linear::CONFIDENCE_MIN,
            ModelKind::Heuristic => ema_pattern::CONFIDENCE_MIN,
        }
    }

    /// Highest confidence the model reports.
    pub fn confidence_ceiling(&self) -> f64 {
        match self {
            ModelKind::LinearRegression => linear::CONFIDENCE_MAX,
            ModelKind::Heuristic => ema_pattern::CONFIDENCE_MAX,
        }
    }

    pub fn forecast<R: Rng + ?Sized>(
        &self,
        frame: &FeatureFrame,
        horizon_days: usize,
        rng: &mut R,
    ) -> ForecastResult {
        match self {
            ModelKind::LinearRegression => linear::forecast(frame, horizon_days, rng),
            ModelKind::Heuristic => ema_pattern::forecast(frame, horizon_days, rng),
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Longest horizon a caller may request: ten years of calendar days.
pub const MAX_HORIZON_DAYS: usize = 3650;

/// The `i`-th calendar day after `last`, or `None` past chrono's date range.
fn future_date(last: NaiveDate, i: usize) -> Option<NaiveDate> {
    let days = i64::try_from(i).ok()?;
    last.checked_add_signed(Duration::try_days(days)?)
}

/// Horizons beyond `MAX_HORIZON_DAYS` are cut to it.
fn bounded_horizon(horizon_days: usize) -> usize {
    horizon_days.min(MAX_HORIZON_DAYS)
}

/// Prices with non-finite values replaced by the mean of the finite ones
/// (0 when none are finite).
fn finite_or_mean(prices: &[f64]) -> Vec<f64> {
    let finite: Vec<f64> = prices.iter().copied().filter(|p| p.is_finite()).collect();
    let fill = if finite.is_empty() {
        0.0
    } else {
        finite.iter().sum::<f64>() / finite.len() as f64
    };
    prices
        .iter()
        .map(|&p| if p.is_finite() { p } else { fill })
        .collect()
}

/// Result for a frame with no rows.
fn empty_result(confidence_floor: f64) -> ForecastResult {
    ForecastResult {
        predictions: Vec::new(),
        mae: 0.0,
        rmse: 0.0,
        confidence_level: round2(confidence_floor),
        trend: Trend::Sideways,
    }
}

fn assemble(
    predictions: Vec<PredictionPoint>,
    last_price: f64,
    mae: f64,
    rmse: f64,
    confidence: f64,
) -> ForecastResult {
    let trend = Trend::classify(last_price, &predictions);
    ForecastResult {
        predictions,
        mae: round2(mae),
        rmse: round2(rmse),
        confidence_level: round2(confidence),
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SyntheticGenerator;
    use crate::domain::{DataSource, PriceRecord, PriceSeries};
    use crate::features::engineer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frame() -> FeatureFrame {
        let series = SyntheticGenerator::default().generate(
            "AAPL",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        );
        engineer(&series)
    }

    #[test]
    fn both_models_honor_horizon_and_spacing() {
        let frame = frame();
        let last = frame.last().unwrap().date;
        for kind in [ModelKind::LinearRegression, ModelKind::Heuristic] {
            let result = kind.forecast(&frame, 7, &mut StdRng::seed_from_u64(1));
            assert_eq!(result.predictions.len(), 7, "{kind}");
            assert_eq!(result.predictions[0].date, last + Duration::days(1));
            assert!(result
                .predictions
                .windows(2)
                .all(|w| w[1].date - w[0].date == Duration::days(1)));
            assert!(result.confidence_level >= kind.confidence_floor());
            assert!(result.confidence_level <= kind.confidence_ceiling());
            assert!(result.mae >= 0.0 && result.rmse >= 0.0);
        }
    }

    #[test]
    fn same_seed_same_forecast() {
        let frame = frame();
        for kind in [ModelKind::LinearRegression, ModelKind::Heuristic] {
            let a = kind.forecast(&frame, 10, &mut StdRng::seed_from_u64(9));
            let b = kind.forecast(&frame, 10, &mut StdRng::seed_from_u64(9));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn empty_frame_yields_floor_and_sideways() {
        let empty = FeatureFrame::default();
        for kind in [ModelKind::LinearRegression, ModelKind::Heuristic] {
            let result = kind.forecast(&empty, 30, &mut StdRng::seed_from_u64(0));
            assert!(result.predictions.is_empty());
            assert_eq!(result.mae, 0.0);
            assert_eq!(result.rmse, 0.0);
            assert_eq!(result.confidence_level, kind.confidence_floor());
            assert_eq!(result.trend, Trend::Sideways);
        }
    }

    #[test]
    fn zero_horizon_is_empty_and_sideways() {
        let result = ModelKind::Heuristic.forecast(&frame(), 0, &mut StdRng::seed_from_u64(0));
        assert!(result.predictions.is_empty());
        assert_eq!(result.trend, Trend::Sideways);
    }

    #[test]
    fn future_date_stops_at_calendar_limit() {
        assert_eq!(
            future_date(NaiveDate::MAX - Duration::days(1), 1),
            Some(NaiveDate::MAX)
        );
        assert_eq!(future_date(NaiveDate::MAX, 1), None);
        assert_eq!(future_date(NaiveDate::MIN, usize::MAX), None);
    }

    fn frame_ending_at(last: NaiveDate, prices: &[f64]) -> FeatureFrame {
        let n = prices.len() as i64;
        let records = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PriceRecord {
                date: last - Duration::days(n - 1 - i as i64),
                price: p,
                open: p,
                high: p,
                low: p,
                volume: 1,
            })
            .collect();
        engineer(&PriceSeries::new(records, DataSource::Live, "T").unwrap())
    }

    #[test]
    fn oversized_horizon_is_cut_to_maximum() {
        let frame = frame();
        for kind in [ModelKind::LinearRegression, ModelKind::Heuristic] {
            let result = kind.forecast(&frame, usize::MAX, &mut StdRng::seed_from_u64(2));
            assert_eq!(result.predictions.len(), MAX_HORIZON_DAYS, "{kind}");
        }
    }

    #[test]
    fn walk_stops_at_last_representable_date() {
        let frame = frame_ending_at(NaiveDate::MAX - Duration::days(3), &[10.0, 11.0, 12.0]);
        for kind in [ModelKind::LinearRegression, ModelKind::Heuristic] {
            let result = kind.forecast(&frame, 30, &mut StdRng::seed_from_u64(2));
            assert_eq!(result.predictions.len(), 3, "{kind}");
            assert_eq!(result.predictions[2].date, NaiveDate::MAX);
        }
    }

    #[test]
    fn non_finite_prices_become_finite_mean() {
        assert_eq!(finite_or_mean(&[1.0, f64::NAN, 3.0]), vec![1.0, 2.0, 3.0]);
        assert_eq!(finite_or_mean(&[f64::INFINITY]), vec![0.0]);
    }

    #[test]
    fn nan_last_price_gives_finite_forecasts() {
        let frame = frame_ending_at(
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            &[100.0, 101.0, 102.0, f64::NAN],
        );
        for kind in [ModelKind::LinearRegression, ModelKind::Heuristic] {
            let result = kind.forecast(&frame, 3, &mut StdRng::seed_from_u64(4));
            assert_eq!(result.predictions.len(), 3, "{kind}");
            assert!(result.mae.is_finite() && result.mae >= 0.0, "{kind} mae {}", result.mae);
            assert!(result.rmse.is_finite() && result.rmse >= 0.0, "{kind} rmse {}", result.rmse);
            assert!(
                result.predictions.iter().all(|p| p.price.is_finite()),
                "{kind} produced a non-finite prediction"
            );
        }
    }

    #[test]
    fn model_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ModelKind::LinearRegression).unwrap(),
            "\"linear_regression\""
        );
        assert_eq!(ModelKind::Heuristic.to_string(), "heuristic");
    }
}
