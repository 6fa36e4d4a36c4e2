//! The immutable record handed to the persistence layer after a forecast.
//!
//! Fields are private and there are no setters: once created, a record is
//! only read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use stockvision_core::data::ExchangeConfig;
use stockvision_core::domain::Trend;

use crate::output::ForecastOutput;
use crate::request::ValidatedRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    user_id: u64,
    stock_symbol: String,
    model_used: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    horizon_days: usize,
    mae: f64,
    rmse: f64,
    confidence_level: f64,
    trend: Trend,
    raw_input_json: String,
    pred_json: String,
    created_at: DateTime<Utc>,
}

impl PredictionRecord {
    /// Build a record for `user_id`. `raw_input_json` is the request body as
    /// the caller received it. The stored symbol has its exchange suffix
    /// removed.
    pub fn new(
        user_id: u64,
        request: &ValidatedRequest,
        raw_input_json: impl Into<String>,
        output: &ForecastOutput,
        exchange: &ExchangeConfig,
    ) -> Result<Self, serde_json::Error> {
        let normalized = ExchangeConfig::normalize(&request.symbol);
        Ok(Self {
            user_id,
            stock_symbol: exchange.base_symbol(&normalized).to_string(),
            model_used: output.model_used.clone(),
            start_date: request.start,
            end_date: request.end,
            horizon_days: request.horizon_days,
            mae: output.mae,
            rmse: output.rmse,
            confidence_level: output.confidence_level,
            trend: output.trend,
            raw_input_json: raw_input_json.into(),
            pred_json: serde_json::to_string(output)?,
            created_at: Utc::now(),
        })
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn stock_symbol(&self) -> &str {
        &self.stock_symbol
    }

    pub fn model_used(&self) -> &str {
        &self.model_used
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    pub fn mae(&self) -> f64 {
        self.mae
    }

    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    pub fn raw_input_json(&self) -> &str {
        &self.raw_input_json
    }

    pub fn pred_json(&self) -> &str {
        &self.pred_json
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
