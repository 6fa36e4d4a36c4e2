//! StockVision Core: price series, data retrieval, features and forecast models.
//!
//! This crate contains the forecasting pipeline's building blocks:
//! - Domain types (price records and series, predictions, forecast results)
//! - Historical data provider with a Yahoo source, circuit breaker and
//!   deterministic synthetic fallback
//! - Symbol resolution against the domestic exchange
//! - Single-series indicators and the feature engineer built from them
//! - Linear regression and EMA-pattern forecast models

pub mod data;
pub mod domain;
pub mod features;
pub mod indicators;
pub mod models;
pub mod rng;
