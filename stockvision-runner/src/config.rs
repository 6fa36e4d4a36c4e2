//! Pipeline configuration, loaded from TOML.
//!
//! Every section is optional; a missing section or key takes its default.
//! `synthetic.base_prices` entries are added to the built-in table.
//!
//! ```toml
//! [provider]
//! offline = false
//! timeout_secs = 10
//! breaker_cooldown_secs = 1800
//! breaker_failure_threshold = 3
//!
//! [exchange]
//! domestic_suffix = ".NS"
//! recognized_suffixes = [".NS", ".BO"]
//!
//! [synthetic]
//! default_base_price = 1000.0
//! base_prices = { ACME = 25.0 }
//!
//! [forecast]
//! default_horizon_days = 30
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use stockvision_core::data::{
    BasePriceTable, CircuitBreaker, ExchangeConfig, YahooSettings, DEFAULT_FAILURE_THRESHOLD,
    DEFAULT_USER_AGENT,
};
use stockvision_core::models::MAX_HORIZON_DAYS;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Live market-data source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Never contact the live source; always use synthetic data.
    pub offline: bool,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub breaker_cooldown_secs: u64,
    /// Consecutive 429/5xx responses before the breaker opens.
    pub breaker_failure_threshold: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            offline: false,
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            breaker_cooldown_secs: 30 * 60,
            breaker_failure_threshold: DEFAULT_FAILURE_THRESHOLD,
        }
    }
}

impl ProviderConfig {
    pub fn yahoo_settings(&self) -> YahooSettings {
        YahooSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn breaker_cooldown(&self) -> Duration {
        Duration::from_secs(self.breaker_cooldown_secs)
    }

    pub fn circuit_breaker(&self) -> CircuitBreaker {
        CircuitBreaker::with_threshold(self.breaker_cooldown(), self.breaker_failure_threshold)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub default_horizon_days: usize,
    /// Master seed for model noise. Drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon_days: 30,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub provider: ProviderConfig,
    pub exchange: ExchangeConfig,
    pub synthetic: BasePriceTable,
    pub forecast: ForecastConfig,
}

impl PipelineConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid("provider.timeout_secs must be > 0".into()));
        }
        if self.provider.breaker_failure_threshold == 0 {
            return Err(ConfigError::Invalid(
                "provider.breaker_failure_threshold must be >= 1".into(),
            ));
        }
        if self.exchange.domestic_suffix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "exchange.domestic_suffix must not be empty".into(),
            ));
        }
        if self.exchange.recognized_suffixes.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "exchange.recognized_suffixes must not contain empty entries".into(),
            ));
        }
        if !valid_price(self.synthetic.default_base_price) {
            return Err(ConfigError::Invalid(format!(
                "synthetic.default_base_price must be positive, got {}",
                self.synthetic.default_base_price
            )));
        }
        if let Some((symbol, price)) = self
            .synthetic
            .base_prices
            .iter()
            .find(|(_, p)| !valid_price(**p))
        {
            return Err(ConfigError::Invalid(format!(
                "synthetic.base_prices.{symbol} must be positive, got {price}"
            )));
        }
        if !(1..=MAX_HORIZON_DAYS).contains(&self.forecast.default_horizon_days) {
            return Err(ConfigError::Invalid(format!(
                "forecast.default_horizon_days must be between 1 and {MAX_HORIZON_DAYS}, got {}",
                self.forecast.default_horizon_days
            )));
        }
        Ok(())
    }
}

fn valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.exchange.domestic_suffix, ".NS");
        assert_eq!(config.synthetic.get("TCS"), 3500.0);
        assert_eq!(config.forecast.default_horizon_days, 30);
        assert_eq!(config.forecast.seed, None);
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = PipelineConfig::default();
        config.provider.offline = true;
        config.forecast.seed = Some(7);
        config.synthetic.base_prices.insert("ACME".into(), 12.5);
        let text = config.to_toml().unwrap();
        let restored = PipelineConfig::from_toml(&text).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            [provider]
            offline = true

            [synthetic]
            base_prices = { ZZZ = 5.0 }
            "#,
        )
        .unwrap();
        assert!(config.provider.offline);
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.synthetic.get("ZZZ"), 5.0);
        assert_eq!(config.synthetic.get("TCS"), 3500.0);
        assert_eq!(config.exchange, ExchangeConfig::default());
    }

    #[test]
    fn base_price_override_keeps_builtin_symbols() {
        let config = PipelineConfig::from_toml(
            "[synthetic]\nbase_prices = { AAPL = 200.0 }\n",
        )
        .unwrap();
        assert_eq!(config.synthetic.get("AAPL"), 200.0);
        assert_eq!(config.synthetic.get("INFY"), 1400.0);
        assert_eq!(config.synthetic.get("MSFT"), 370.0);
    }

    #[test]
    fn horizon_default_above_maximum_is_invalid() {
        let err = PipelineConfig::from_toml("[forecast]\ndefault_horizon_days = 100000\n")
            .unwrap_err();
        assert!(err.to_string().contains("default_horizon_days"));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let err = PipelineConfig::from_toml("[provider]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_failure_threshold_is_invalid() {
        let err =
            PipelineConfig::from_toml("[provider]\nbreaker_failure_threshold = 0\n").unwrap_err();
        assert!(err.to_string().contains("breaker_failure_threshold"));
    }

    #[test]
    fn empty_suffix_is_invalid() {
        let err = PipelineConfig::from_toml("[exchange]\ndomestic_suffix = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_positive_base_price_is_invalid() {
        let err =
            PipelineConfig::from_toml("[synthetic]\nbase_prices = { BAD = -1.0 }\n").unwrap_err();
        assert!(err.to_string().contains("BAD"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = PipelineConfig::from_toml("[provider\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PipelineConfig::from_file(Path::new("/nonexistent/stockvision.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
