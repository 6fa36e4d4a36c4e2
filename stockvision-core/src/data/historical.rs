//! Historical data provider: live retrieval with a synthetic fallback.
//!
//! `fetch` never fails. Retrieval is a two-stage result internally
//! (`Result<PriceSeries, Unavailable>`); every `Unavailable` is logged and
//! collapsed into a generated series tagged `synthetic`.

use super::provider::{DataError, MarketDataSource, RawBar};
use super::symbols::ExchangeConfig;
use super::synthetic::SyntheticGenerator;
use crate::domain::{DataSource, PriceRecord, PriceSeries};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Why live retrieval produced nothing usable.
#[derive(Debug)]
enum Unavailable {
    Offline,
    SourceUnavailable { source: String },
    Empty { tried: Vec<String> },
    Failed { symbol: String, error: DataError },
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unavailable::Offline => f.write_str("no live source configured"),
            Unavailable::SourceUnavailable { source } => {
                write!(f, "source '{source}' is refusing requests")
            }
            Unavailable::Empty { tried } => write!(f, "no rows for {}", tried.join(", ")),
            Unavailable::Failed { symbol, error } => write!(f, "{symbol}: {error}"),
        }
    }
}

pub struct HistoricalDataProvider {
    source: Option<Arc<dyn MarketDataSource>>,
    exchange: ExchangeConfig,
    generator: SyntheticGenerator,
}

impl HistoricalDataProvider {
    pub fn new(
        source: Option<Arc<dyn MarketDataSource>>,
        exchange: ExchangeConfig,
        generator: SyntheticGenerator,
    ) -> Self {
        Self {
            source,
            exchange,
            generator,
        }
    }

    /// Provider that never touches the network.
    pub fn offline(exchange: ExchangeConfig, generator: SyntheticGenerator) -> Self {
        Self::new(None, exchange, generator)
    }

    pub fn exchange(&self) -> &ExchangeConfig {
        &self.exchange
    }

    /// Daily series for `symbol`, live if possible, synthetic otherwise.
    pub fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let normalized = ExchangeConfig::normalize(symbol);
        match self.fetch_live(&normalized, start, end) {
            Ok(series) => {
                info!(
                    symbol = %normalized,
                    resolved = series.resolved_symbol(),
                    rows = series.len(),
                    "loaded live price history"
                );
                series
            }
            Err(reason) => {
                warn!(
                    symbol = %normalized,
                    %reason,
                    "live data unavailable, using synthetic series"
                );
                self.generator.generate(&normalized, start, end)
            }
        }
    }

    fn fetch_live(
        &self,
        normalized: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, Unavailable> {
        let source = self.source.as_ref().ok_or(Unavailable::Offline)?;
        if !source.is_available() {
            return Err(Unavailable::SourceUnavailable {
                source: source.name().to_string(),
            });
        }

        let first = self.exchange.resolve(normalized);
        let mut tried = vec![first.clone()];
        debug!(symbol = %first, source = source.name(), "fetching history");
        let mut bars = Self::attempt(source.as_ref(), &first, start, end)?;
        let mut resolved = first;

        if bars.is_empty() && !self.exchange.has_suffix(&resolved) {
            let retry = self.exchange.with_domestic_suffix(&resolved);
            info!(symbol = %resolved, retry = %retry, "no rows, retrying with exchange suffix");
            tried.push(retry.clone());
            bars = Self::attempt(source.as_ref(), &retry, start, end)?;
            resolved = retry;
        }

        let records = bars.into_iter().map(to_record).collect();
        PriceSeries::new(records, DataSource::Live, resolved)
            .map_err(|_| Unavailable::Empty { tried })
    }

    fn attempt(
        source: &dyn MarketDataSource,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>, Unavailable> {
        source
            .fetch(symbol, start, end)
            .map_err(|error| Unavailable::Failed {
                symbol: symbol.to_string(),
                error,
            })
    }
}

fn to_record(bar: RawBar) -> PriceRecord {
    PriceRecord {
        date: bar.date,
        price: bar.close,
        open: bar.open,
        high: bar.high,
        low: bar.low,
        volume: bar.volume,
    }
}
