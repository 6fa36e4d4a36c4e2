//! Visualization-ready forecast output and its display labels.

use serde::{Deserialize, Serialize};
use stockvision_core::domain::{
    round2, DataSource, ForecastResult, PredictionPoint, PricePoint, PriceSeries, Trend,
};

/// Current schema version for persisted forecast artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Both model results, present only when the caller asked for `both`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub linear_regression: ForecastResult,
    pub heuristic: ForecastResult,
}

/// Everything the dashboard needs to chart one forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOutput {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub resolved_symbol: String,
    pub model_used: String,
    pub data_source: DataSource,
    pub historical: Vec<PricePoint>,
    pub predicted: Vec<PredictionPoint>,
    pub mae: f64,
    pub rmse: f64,
    pub confidence_level: f64,
    pub trend: Trend,
    /// Both models' results in `both` mode; `null` otherwise.
    #[serde(default)]
    pub comparison: Option<Comparison>,
}

impl ForecastOutput {
    /// Assemble the output from the series and the primary model result.
    pub fn assemble(
        symbol: &str,
        model_used: &str,
        series: &PriceSeries,
        primary: ForecastResult,
        comparison: Option<Comparison>,
    ) -> Self {
        let historical = series
            .records()
            .iter()
            .map(|r| PricePoint {
                date: r.date,
                price: round2(r.price),
            })
            .collect();

        Self {
            schema_version: SCHEMA_VERSION,
            symbol: symbol.to_string(),
            resolved_symbol: series.resolved_symbol().to_string(),
            model_used: model_used.to_string(),
            data_source: series.data_source(),
            historical,
            predicted: primary.predictions,
            mae: primary.mae,
            rmse: primary.rmse,
            confidence_level: primary.confidence_level,
            trend: primary.trend,
            comparison,
        }
    }

    /// Attach the dashboard labels.
    pub fn labeled(self) -> LabeledOutput {
        let trend_label = trend_label(self.trend.as_str()).to_string();
        let confidence_label = confidence_label(self.confidence_level).to_string();
        LabeledOutput {
            output: self,
            trend_label,
            confidence_label,
        }
    }
}

/// Output plus human-readable trend and confidence labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledOutput {
    #[serde(flatten)]
    pub output: ForecastOutput,
    pub trend_label: String,
    pub confidence_label: String,
}

/// `bullish` → Upward, `bearish` → Downward, `sideways` → Stable, else Unknown.
pub fn trend_label(trend: &str) -> &'static str {
    match trend {
        "bullish" => Trend::Bullish.label(),
        "bearish" => Trend::Bearish.label(),
        "sideways" => Trend::Sideways.label(),
        _ => "Unknown",
    }
}

/// High at 0.7 and above, Medium at 0.5 and above, Low otherwise.
pub fn confidence_label(confidence_level: f64) -> &'static str {
    if confidence_level >= 0.7 {
        "High"
    } else if confidence_level >= 0.5 {
        "Medium"
    } else {
        "Low"
    }
}
