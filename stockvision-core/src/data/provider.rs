//! Market-data source trait and structured error types.
//!
//! `MarketDataSource` abstracts over where live daily bars come from (Yahoo
//! Finance in production, scripted mocks in tests). Sources report failures
//! as `DataError`; the `HistoricalDataProvider` above them turns every failure
//! into a synthetic fallback.

use chrono::NaiveDate;
use thiserror::Error;

/// Raw daily OHLCV bar as returned by a source, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Why a source could not deliver data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("data provider is blocking requests (circuit breaker open)")]
    CircuitBreakerTripped,

    #[error("http client setup failed: {0}")]
    Client(String),

    #[error("data error: {0}")]
    Other(String),
}

/// A source of live daily bars.
///
/// `fetch` covers the half-open range `[start, end)`. An empty vector means
/// the source answered but had no rows for the symbol; callers treat that the
/// same as an error.
pub trait MarketDataSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<RawBar>, DataError>;

    /// False while the source is refusing requests (e.g. circuit breaker open).
    fn is_available(&self) -> bool;
}
