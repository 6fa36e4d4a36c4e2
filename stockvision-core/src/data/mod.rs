//! Market data: live retrieval, symbol resolution and the synthetic fallback.

pub mod circuit_breaker;
pub mod historical;
pub mod provider;
pub mod symbols;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::{BreakerState, CircuitBreaker, DEFAULT_FAILURE_THRESHOLD};
pub use historical::HistoricalDataProvider;
pub use provider::{DataError, MarketDataSource, RawBar};
pub use symbols::{ExchangeConfig, DEFAULT_DOMESTIC_TICKERS};
pub use synthetic::{BasePriceTable, SyntheticGenerator, MIN_TRADING_DAYS};
pub use yahoo::{YahooSettings, YahooSource, DEFAULT_USER_AGENT};
