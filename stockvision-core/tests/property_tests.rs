//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Synthetic generation is deterministic and never empty
//! 2. Engineered features are always finite
//! 3. Forecasts have exactly `horizon` points, one calendar day apart
//! 4. Confidence stays inside each model's band
//! 5. Trend follows the ±2% rule

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stockvision_core::data::SyntheticGenerator;
use stockvision_core::domain::{DataSource, PredictionPoint, PriceRecord, PriceSeries, Trend};
use stockvision_core::features::engineer;
use stockvision_core::models::ModelKind;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_symbol() -> impl Strategy<Value = String> {
    "[A-Z]{1,6}(\\.NS)?"
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|d| NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + Duration::days(d))
}

fn arb_prices() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![
            8 => 0.01..10_000.0_f64,
            1 => Just(0.0),
            1 => Just(f64::NAN),
        ],
        1..120,
    )
}

fn series_from(prices: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records = prices
        .iter()
        .enumerate()
        .map(|(i, &p)| PriceRecord {
            date: start + Duration::days(i as i64),
            price: p,
            open: p,
            high: p,
            low: p,
            volume: 0,
        })
        .collect();
    PriceSeries::new(records, DataSource::Live, "PROP").unwrap()
}

// ── 1. Synthetic generator ───────────────────────────────────────────

proptest! {
    #[test]
    fn synthetic_is_deterministic_and_non_empty(
        symbol in arb_symbol(),
        start in arb_date(),
        span in -30i64..400,
    ) {
        let end = start + Duration::days(span);
        let generator = SyntheticGenerator::default();
        let a = generator.generate(&symbol, start, end);
        let b = generator.generate(&symbol, start, end);
        prop_assert!(!a.is_empty());
        prop_assert_eq!(a.data_source(), DataSource::Synthetic);
        prop_assert_eq!(a.resolved_symbol(), symbol.as_str());
        prop_assert!(a.records().windows(2).all(|w| w[0].date < w[1].date));
        prop_assert_eq!(a, b);
    }
}

// ── 2. Features ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn features_are_finite(prices in arb_prices()) {
        let frame = engineer(&series_from(&prices));
        prop_assert_eq!(frame.len(), prices.len());
        for row in frame.rows() {
            for v in [
                row.ma_7, row.ma_14, row.ma_21, row.returns, row.momentum_5,
                row.momentum_10, row.volatility, row.price_vs_ma7, row.price_vs_ma21,
            ] {
                prop_assert!(v.is_finite(), "non-finite feature in {:?}", row);
            }
        }
    }
}

// ── 3 & 4. Forecast shape and confidence ────────────────────────────

proptest! {
    #[test]
    fn forecast_shape_and_confidence(
        symbol in arb_symbol(),
        horizon in 1usize..60,
        seed in any::<u64>(),
        linear in any::<bool>(),
    ) {
        let kind = if linear { ModelKind::LinearRegression } else { ModelKind::Heuristic };
        let series = SyntheticGenerator::default().generate(
            &symbol,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        );
        let last = series.last_date();
        let result = kind.forecast(&engineer(&series), horizon, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(result.predictions.len(), horizon);
        prop_assert_eq!(result.predictions[0].date, last + Duration::days(1));
        prop_assert!(result.predictions.windows(2).all(|w| w[1].date - w[0].date == Duration::days(1)));
        prop_assert!(result.confidence_level >= kind.confidence_floor());
        prop_assert!(result.confidence_level <= kind.confidence_ceiling());
        prop_assert!(result.mae >= 0.0);
        prop_assert!(result.rmse >= 0.0);
    }
}

// ── 5. Trend rule ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn trend_follows_threshold(last in 1.0..1000.0_f64, change in -0.5..0.5_f64) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let predictions = vec![
            PredictionPoint { date: start, price: last },
            PredictionPoint { date: start + Duration::days(1), price: last * (1.0 + change) },
        ];
        let trend = Trend::classify(last, &predictions);
        let realized = (predictions[1].price - last) / last;
        let expected = if realized > 0.02 {
            Trend::Bullish
        } else if realized < -0.02 {
            Trend::Bearish
        } else {
            Trend::Sideways
        };
        prop_assert_eq!(trend, expected);
    }
}
