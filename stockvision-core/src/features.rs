//! Feature engineering: one row of technical features per trading day.
//!
//! Every derived value is finite. Undefined or degenerate positions (the first
//! return, momentum before enough history, a one-observation volatility
//! window, a zero moving average) are reported as 0.

use crate::domain::PriceSeries;
use crate::indicators::{Indicator, Roc, RollingStd, Sma};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const VOLATILITY_WINDOW: usize = 14;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub price: f64,
    pub ma_7: f64,
    pub ma_14: f64,
    pub ma_21: f64,
    pub returns: f64,
    pub momentum_5: f64,
    pub momentum_10: f64,
    pub volatility: f64,
    pub price_vs_ma7: f64,
    pub price_vs_ma21: f64,
    pub day_index: usize,
}

/// Feature rows in series order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureFrame {
    rows: Vec<FeatureRow>,
}

impl FeatureFrame {
    pub fn from_rows(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&FeatureRow> {
        self.rows.last()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.price).collect()
    }

    pub fn returns(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.returns).collect()
    }
}

/// Derive the feature frame for a series. Pure and order-preserving.
pub fn engineer(series: &PriceSeries) -> FeatureFrame {
    let prices = series.prices();

    let ma_7 = finite_or_zero(Sma::new(7).compute(&prices));
    let ma_14 = finite_or_zero(Sma::new(14).compute(&prices));
    let ma_21 = finite_or_zero(Sma::new(21).compute(&prices));
    let returns = finite_or_zero(Roc::new(1).compute(&prices));
    let momentum_5 = finite_or_zero(Roc::new(5).compute(&prices));
    let momentum_10 = finite_or_zero(Roc::new(10).compute(&prices));
    let volatility = finite_or_zero(RollingStd::new(VOLATILITY_WINDOW).compute(&returns));

    let rows = series
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| FeatureRow {
            date: record.date,
            price: record.price,
            ma_7: ma_7[i],
            ma_14: ma_14[i],
            ma_21: ma_21[i],
            returns: returns[i],
            momentum_5: momentum_5[i],
            momentum_10: momentum_10[i],
            volatility: volatility[i],
            price_vs_ma7: relative_to(record.price, ma_7[i]),
            price_vs_ma21: relative_to(record.price, ma_21[i]),
            day_index: i,
        })
        .collect();

    FeatureFrame { rows }
}

fn finite_or_zero(values: Vec<f64>) -> Vec<f64> {
    values
        .into_iter()
        .map(|v| if v.is_finite() { v } else { 0.0 })
        .collect()
}

/// `(price - ma) / ma`, or 0 when that is not a finite number.
fn relative_to(price: f64, ma: f64) -> f64 {
    if ma == 0.0 {
        return 0.0;
    }
    let ratio = (price - ma) / ma;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}
