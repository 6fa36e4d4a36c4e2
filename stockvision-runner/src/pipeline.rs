//! Pipeline orchestrator: validate → fetch → engineer → model(s) → output.
//!
//! The pipeline owns the data provider and the noise seed; each run is
//! otherwise stateless. Model noise comes from an `RngHierarchy` stream keyed
//! by the resolved symbol and model name, so a fixed master seed reproduces a
//! run exactly and `both` mode draws the same numbers as the single runs.

use chrono::NaiveDate;
use std::sync::Arc;
use stockvision_core::data::{
    DataError, HistoricalDataProvider, MarketDataSource, SyntheticGenerator, YahooSource,
};
use stockvision_core::domain::{ForecastResult, PriceSeries};
use stockvision_core::features::{engineer, FeatureFrame};
use stockvision_core::models::{ModelKind, MAX_HORIZON_DAYS};
use stockvision_core::rng::RngHierarchy;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, PipelineConfig};
use crate::output::{Comparison, ForecastOutput};
use crate::request::{ForecastRequest, ModelChoice, ValidatedRequest};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unknown model '{0}' (expected linear, heuristic or both)")]
    UnknownModel(String),
    #[error("symbol must not be empty")]
    EmptySymbol,
    #[error("invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("start date {start} must be before end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("horizon_days must be between 1 and {max}, got {0}", max = MAX_HORIZON_DAYS)]
    InvalidHorizon(usize),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data source setup failed: {0}")]
    Source(#[from] DataError),
}

pub struct Pipeline {
    provider: HistoricalDataProvider,
    rng: RngHierarchy,
}

impl Pipeline {
    pub fn new(provider: HistoricalDataProvider, rng: RngHierarchy) -> Self {
        Self { provider, rng }
    }

    /// Build the provider (Yahoo unless offline) and seed from config.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;

        let source: Option<Arc<dyn MarketDataSource>> = if config.provider.offline {
            None
        } else {
            let breaker = Arc::new(config.provider.circuit_breaker());
            let yahoo = YahooSource::new(&config.provider.yahoo_settings(), breaker)?;
            Some(Arc::new(yahoo) as Arc<dyn MarketDataSource>)
        };
        let generator = SyntheticGenerator::new(config.synthetic.clone(), config.exchange.clone());
        let provider = HistoricalDataProvider::new(source, config.exchange.clone(), generator);

        let rng = match config.forecast.seed {
            Some(seed) => RngHierarchy::new(seed),
            None => RngHierarchy::from_entropy(),
        };
        debug!(seed = rng.master_seed(), "model noise seed");

        Ok(Self::new(provider, rng))
    }

    pub fn provider(&self) -> &HistoricalDataProvider {
        &self.provider
    }

    pub fn master_seed(&self) -> u64 {
        self.rng.master_seed()
    }

    /// Run one forecast. Fails only on an invalid request, and then before
    /// any data is fetched.
    pub fn run(&self, request: &ForecastRequest) -> Result<ForecastOutput, PipelineError> {
        let request = request.validate()?;
        Ok(self.run_validated(&request))
    }

    pub fn run_validated(&self, request: &ValidatedRequest) -> ForecastOutput {
        info!(
            symbol = %request.symbol,
            start = %request.start,
            end = %request.end,
            model = %request.model,
            horizon = request.horizon_days,
            "running forecast"
        );

        let series = self
            .provider
            .fetch(&request.symbol, request.start, request.end);
        let frame = engineer(&series);

        let (primary, comparison) = match request.model {
            ModelChoice::Single(kind) => (
                self.forecast(kind, &series, &frame, request.horizon_days),
                None,
            ),
            ModelChoice::Both => {
                let linear = self.forecast(
                    ModelKind::LinearRegression,
                    &series,
                    &frame,
                    request.horizon_days,
                );
                let heuristic =
                    self.forecast(ModelKind::Heuristic, &series, &frame, request.horizon_days);
                (
                    heuristic.clone(),
                    Some(Comparison {
                        linear_regression: linear,
                        heuristic,
                    }),
                )
            }
        };

        ForecastOutput::assemble(
            &request.symbol,
            request.model.as_str(),
            &series,
            primary,
            comparison,
        )
    }

    fn forecast(
        &self,
        kind: ModelKind,
        series: &PriceSeries,
        frame: &FeatureFrame,
        horizon_days: usize,
    ) -> ForecastResult {
        debug!(model = %kind, rows = frame.len(), "dispatching model");
        let mut rng = self.rng.rng_for(series.resolved_symbol(), kind.as_str());
        kind.forecast(frame, horizon_days, &mut rng)
    }
}
