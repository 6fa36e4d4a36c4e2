//! Forecast output types shared by both models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Net change above which a forecast counts as directional (2%).
pub const TREND_THRESHOLD: f64 = 0.02;

/// A `{date, price}` pair, used for both the charted history and predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// A single future day. Dates step by calendar days, not business days.
pub type PredictionPoint = PricePoint;

/// Coarse direction of a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Sideways,
}

impl Trend {
    /// Classify the net move from the last observed price to the last prediction.
    ///
    /// Fewer than two predictions is always `Sideways`.
    pub fn classify(last_price: f64, predictions: &[PredictionPoint]) -> Self {
        if predictions.len() < 2 {
            return Trend::Sideways;
        }
        let last_predicted = predictions[predictions.len() - 1].price;
        Self::from_change((last_predicted - last_price) / last_price)
    }

    /// Classify a fractional change (0.03 = +3%).
    pub fn from_change(change: f64) -> Self {
        if change > TREND_THRESHOLD {
            Trend::Bullish
        } else if change < -TREND_THRESHOLD {
            Trend::Bearish
        } else {
            Trend::Sideways
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Sideways => "sideways",
        }
    }

    /// Display label shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Bullish => "Upward",
            Trend::Bearish => "Downward",
            Trend::Sideways => "Stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predictions plus in-sample quality metrics for one model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predictions: Vec<PredictionPoint>,
    pub mae: f64,
    pub rmse: f64,
    pub confidence_level: f64,
    pub trend: Trend,
}

/// Round to two decimals, the precision of every price and metric we emit.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
