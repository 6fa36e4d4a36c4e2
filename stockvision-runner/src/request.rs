//! Forecast requests and their validation.
//!
//! A request is checked completely before any data is fetched, so a bad
//! model name or date never costs a network round trip.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use stockvision_core::models::{ModelKind, MAX_HORIZON_DAYS};

use crate::pipeline::PipelineError;

pub const DEFAULT_HORIZON_DAYS: usize = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A forecast request as received from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
    pub model: String,
    #[serde(default = "default_horizon")]
    pub horizon_days: usize,
}

fn default_horizon() -> usize {
    DEFAULT_HORIZON_DAYS
}

/// Which model(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelChoice {
    Single(ModelKind),
    Both,
}

impl ModelChoice {
    /// Canonical name reported as `model_used`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::Single(kind) => kind.as_str(),
            ModelChoice::Both => "both",
        }
    }
}

impl FromStr for ModelChoice {
    type Err = PipelineError;

    /// Accepts the front-end names (`linear`, `heuristic`, `both`), the
    /// canonical `linear_regression`, and the legacy `lstm` alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "linear_regression" => Ok(ModelChoice::Single(ModelKind::LinearRegression)),
            "heuristic" | "lstm" => Ok(ModelChoice::Single(ModelKind::Heuristic)),
            "both" => Ok(ModelChoice::Both),
            _ => Err(PipelineError::UnknownModel(s.to_string())),
        }
    }
}

impl std::fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub model: ModelChoice,
    pub horizon_days: usize,
}

impl ForecastRequest {
    pub fn new(
        symbol: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            model: model.into(),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    pub fn with_horizon(mut self, horizon_days: usize) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// Model first, so an unknown model is reported even if other fields
    /// are also wrong.
    pub fn validate(&self) -> Result<ValidatedRequest, PipelineError> {
        let model: ModelChoice = self.model.parse()?;

        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            return Err(PipelineError::EmptySymbol);
        }

        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if start >= end {
            return Err(PipelineError::InvalidRange { start, end });
        }

        if !(1..=MAX_HORIZON_DAYS).contains(&self.horizon_days) {
            return Err(PipelineError::InvalidHorizon(self.horizon_days));
        }

        Ok(ValidatedRequest {
            symbol: symbol.to_string(),
            start,
            end,
            model,
            horizon_days: self.horizon_days,
        })
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, PipelineError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| PipelineError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(model: &str) -> ForecastRequest {
        ForecastRequest::new("AAPL", "2023-01-01", "2023-06-01", model)
    }

    #[test]
    fn model_aliases() {
        assert_eq!(
            "linear".parse::<ModelChoice>().unwrap(),
            ModelChoice::Single(ModelKind::LinearRegression)
        );
        assert_eq!(
            "linear_regression".parse::<ModelChoice>().unwrap(),
            ModelChoice::Single(ModelKind::LinearRegression)
        );
        assert_eq!(
            "heuristic".parse::<ModelChoice>().unwrap(),
            ModelChoice::Single(ModelKind::Heuristic)
        );
        assert_eq!(
            "lstm".parse::<ModelChoice>().unwrap(),
            ModelChoice::Single(ModelKind::Heuristic)
        );
        assert_eq!(" Both ".parse::<ModelChoice>().unwrap(), ModelChoice::Both);
    }

    #[test]
    fn unknown_model_is_rejected() {
        let err = "arima".parse::<ModelChoice>().unwrap_err();
        assert!(matches!(err, PipelineError::UnknownModel(ref m) if m == "arima"));
    }

    #[test]
    fn canonical_names() {
        assert_eq!(ModelChoice::Single(ModelKind::LinearRegression).as_str(), "linear_regression");
        assert_eq!(ModelChoice::Single(ModelKind::Heuristic).as_str(), "heuristic");
        assert_eq!(ModelChoice::Both.as_str(), "both");
    }

    #[test]
    fn valid_request() {
        let v = request("linear").with_horizon(5).validate().unwrap();
        assert_eq!(v.symbol, "AAPL");
        assert_eq!(v.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(v.end, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(v.horizon_days, 5);
    }

    #[test]
    fn default_horizon_is_thirty() {
        let json = r#"{"symbol":"TCS","start_date":"2023-01-01","end_date":"2023-02-01","model":"both"}"#;
        let req: ForecastRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.horizon_days, 30);
    }

    #[test]
    fn blank_symbol_is_rejected() {
        let mut req = request("linear");
        req.symbol = "   ".into();
        assert!(matches!(req.validate(), Err(PipelineError::EmptySymbol)));
    }

    #[test]
    fn bad_date_format_is_rejected() {
        let mut req = request("linear");
        req.start_date = "01/01/2023".into();
        assert!(matches!(
            req.validate(),
            Err(PipelineError::InvalidDate { field: "start_date", .. })
        ));
    }

    #[test]
    fn start_must_precede_end() {
        let mut req = request("linear");
        req.end_date = req.start_date.clone();
        assert!(matches!(req.validate(), Err(PipelineError::InvalidRange { .. })));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let req = request("heuristic").with_horizon(0);
        assert!(matches!(req.validate(), Err(PipelineError::InvalidHorizon(0))));
    }

    #[test]
    fn horizon_above_maximum_is_rejected() {
        let req = request("linear").with_horizon(usize::MAX);
        let err = req.validate().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidHorizon(usize::MAX)));
        assert!(err.to_string().contains(&MAX_HORIZON_DAYS.to_string()));

        let at_max = request("linear").with_horizon(MAX_HORIZON_DAYS);
        assert_eq!(at_max.validate().unwrap().horizon_days, MAX_HORIZON_DAYS);
    }

    #[test]
    fn unknown_model_wins_over_other_errors() {
        let mut req = request("arima");
        req.symbol = String::new();
        assert!(matches!(req.validate(), Err(PipelineError::UnknownModel(_))));
    }
}
