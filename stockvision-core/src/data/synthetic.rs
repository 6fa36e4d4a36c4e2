//! Synthetic price series for when no live data is available.
//!
//! A seeded random walk with drift, a linear trend and mean reversion around a
//! per-symbol base price. The seed depends only on the symbol, so the same
//! symbol and range always produce the same series. Output is clearly tagged
//! `synthetic` and is never passed off as market data.

use super::symbols::ExchangeConfig;
use crate::domain::{DataSource, PriceRecord, PriceSeries};
use crate::rng::symbol_rng;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum number of trading days in a generated series.
pub const MIN_TRADING_DAYS: usize = 30;

const DRIFT: f64 = 0.0002;
const VOLATILITY: f64 = 0.015;
const TREND_SPAN: f64 = 0.10;
const MEAN_REVERSION: f64 = 0.02;
const FLOOR_RATIO: f64 = 0.5;

/// Approximate price levels (local currency) used as the walk's anchor.
const DEFAULT_BASE_PRICES: &[(&str, f64)] = &[
    // NSE (INR)
    ("TCS", 3500.0),
    ("INFY", 1400.0),
    ("WIPRO", 450.0),
    ("HCLTECH", 1200.0),
    ("TECHM", 1100.0),
    ("HDFCBANK", 1600.0),
    ("ICICIBANK", 950.0),
    ("SBIN", 600.0),
    ("KOTAKBANK", 1750.0),
    ("AXISBANK", 1050.0),
    ("BAJFINANCE", 6800.0),
    ("RELIANCE", 2500.0),
    ("POWERGRID", 280.0),
    ("NTPC", 320.0),
    ("ONGC", 250.0),
    ("LT", 2800.0),
    ("ADANIENT", 2600.0),
    ("HINDUNILVR", 2400.0),
    ("ITC", 440.0),
    ("TITAN", 3200.0),
    ("ASIANPAINT", 3100.0),
    ("MARUTI", 10500.0),
    ("TATAMOTORS", 750.0),
    ("BHARTIARTL", 1100.0),
    ("SUNPHARMA", 1200.0),
    ("DRREDDY", 5400.0),
    ("CIPLA", 1300.0),
    // US (USD)
    ("AAPL", 180.0),
    ("GOOGL", 140.0),
    ("MSFT", 370.0),
    ("AMZN", 175.0),
    ("META", 350.0),
    ("NVDA", 480.0),
    ("TSLA", 250.0),
    ("NFLX", 450.0),
    ("JPM", 170.0),
    ("V", 260.0),
    ("PYPL", 65.0),
    ("WMT", 160.0),
    ("PG", 155.0),
    ("DIS", 110.0),
    ("JNJ", 160.0),
];

/// Base price per bare ticker, with a default for anything unlisted.
///
/// A deserialized `base_prices` map is laid over the built-in table: listed
/// tickers are added or replaced, the rest keep their built-in price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasePriceTable {
    pub default_base_price: f64,
    #[serde(deserialize_with = "over_builtin_prices")]
    pub base_prices: BTreeMap<String, f64>,
}

fn builtin_prices() -> BTreeMap<String, f64> {
    DEFAULT_BASE_PRICES
        .iter()
        .map(|(symbol, price)| (symbol.to_string(), *price))
        .collect()
}

fn over_builtin_prices<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let overrides = BTreeMap::<String, f64>::deserialize(deserializer)?;
    let mut prices = builtin_prices();
    prices.extend(overrides);
    Ok(prices)
}

impl Default for BasePriceTable {
    fn default() -> Self {
        Self {
            default_base_price: 1000.0,
            base_prices: builtin_prices(),
        }
    }
}

impl BasePriceTable {
    pub fn get(&self, base_symbol: &str) -> f64 {
        self.base_prices
            .get(base_symbol)
            .copied()
            .unwrap_or(self.default_base_price)
    }
}

/// Deterministic fallback series generator.
#[derive(Debug, Clone, Default)]
pub struct SyntheticGenerator {
    prices: BasePriceTable,
    exchange: ExchangeConfig,
}

impl SyntheticGenerator {
    pub fn new(prices: BasePriceTable, exchange: ExchangeConfig) -> Self {
        Self { prices, exchange }
    }

    pub fn base_prices(&self) -> &BasePriceTable {
        &self.prices
    }

    /// `floor(days * 5 / 7)`, never below `MIN_TRADING_DAYS`.
    pub fn trading_day_count(start: NaiveDate, end: NaiveDate) -> usize {
        let days = (end - start).num_days();
        let approx = (days * 5).div_euclid(7);
        usize::try_from(approx)
            .unwrap_or(0)
            .max(MIN_TRADING_DAYS)
    }

    /// Business days in `[start, end]`, at most `trading_day_count`. When the
    /// range holds none, that many business days counted forward from `start`.
    pub fn trading_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let count = Self::trading_day_count(start, end);
        let in_range: Vec<NaiveDate> = business_days_from(start)
            .take_while(|d| *d <= end)
            .take(count)
            .collect();
        if in_range.is_empty() {
            business_days_from(start).take(count).collect()
        } else {
            in_range
        }
    }

    /// Generate the series for `symbol` over `[start, end]`.
    ///
    /// `symbol` should already be normalized; it is both the seed key and the
    /// resolved symbol on the result.
    pub fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let dates = Self::trading_dates(start, end);
        let n = dates.len();
        let base = self.prices.get(self.exchange.base_symbol(symbol));
        let mut rng = symbol_rng(symbol);

        let returns: Vec<f64> = (0..n)
            .map(|_| {
                let z: f64 = rng.sample(StandardNormal);
                DRIFT + VOLATILITY * z
            })
            .collect();
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let slope = if n > 1 {
            sign * TREND_SPAN * base / (n - 1) as f64
        } else {
            0.0
        };

        let mut prices = Vec::with_capacity(n);
        let mut price = base;
        prices.push(price);
        for r in returns.iter().take(n.saturating_sub(1)) {
            let mean_rev = MEAN_REVERSION * (base - price) / base;
            price = (price * (1.0 + r + mean_rev) + slope).max(base * FLOOR_RATIO);
            prices.push(price);
        }

        let opens: Vec<f64> = prices
            .iter()
            .map(|p| p * (1.0 + rng.gen_range(-0.01..0.01)))
            .collect();
        let highs: Vec<f64> = prices
            .iter()
            .map(|p| p * (1.0 + rng.gen_range(0.0..0.02)))
            .collect();
        let lows: Vec<f64> = prices
            .iter()
            .map(|p| p * (1.0 - rng.gen_range(0.0..0.02)))
            .collect();
        let volumes: Vec<u64> = prices
            .iter()
            .map(|_| rng.gen_range(1_000_000.0..10_000_000.0_f64) as u64)
            .collect();

        let records = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| PriceRecord {
                date,
                price: prices[i],
                open: opens[i],
                high: highs[i],
                low: lows[i],
                volume: volumes[i],
            })
            .collect();

        PriceSeries::from_canonical(records, DataSource::Synthetic, symbol.to_string())
    }
}

fn business_days_from(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |d| d.checked_add_signed(Duration::days(1)))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
}
