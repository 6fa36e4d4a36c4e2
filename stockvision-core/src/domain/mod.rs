//! Domain types for StockVision

pub mod forecast;
pub mod series;

pub use forecast::{round2, ForecastResult, PredictionPoint, PricePoint, Trend, TREND_THRESHOLD};
pub use series::{DataSource, PriceRecord, PriceSeries, SeriesError};
