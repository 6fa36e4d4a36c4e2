//! StockVision Runner: forecast orchestration on top of `stockvision-core`.
//!
//! This crate provides:
//! - TOML pipeline configuration
//! - Request validation (model names, dates, horizon)
//! - The pipeline orchestrator, including `both` comparison mode
//! - Output assembly and dashboard labels
//! - The immutable prediction record handed to persistence
//! - JSON/CSV export

pub mod config;
pub mod export;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod request;

pub use config::{ConfigError, ForecastConfig, PipelineConfig, ProviderConfig};
pub use export::{export_json, export_series_csv, import_json, load_artifacts, save_artifacts};
pub use output::{
    confidence_label, trend_label, Comparison, ForecastOutput, LabeledOutput, SCHEMA_VERSION,
};
pub use pipeline::{Pipeline, PipelineError};
pub use record::PredictionRecord;
pub use request::{ForecastRequest, ModelChoice, ValidatedRequest, DEFAULT_HORIZON_DAYS};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<PipelineConfig>();
        assert_sync::<PipelineConfig>();
    }

    #[test]
    fn request_types_are_send_sync() {
        assert_send::<ForecastRequest>();
        assert_sync::<ForecastRequest>();
        assert_send::<ValidatedRequest>();
        assert_sync::<ValidatedRequest>();
    }

    #[test]
    fn output_types_are_send_sync() {
        assert_send::<ForecastOutput>();
        assert_sync::<ForecastOutput>();
        assert_send::<LabeledOutput>();
        assert_sync::<LabeledOutput>();
        assert_send::<PredictionRecord>();
        assert_sync::<PredictionRecord>();
    }

    #[test]
    fn pipeline_is_send_sync() {
        assert_send::<Pipeline>();
        assert_sync::<Pipeline>();
    }
}
