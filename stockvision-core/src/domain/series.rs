//! PriceSeries: the daily price history a forecast is built from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One trading day of OHLCV data. `price` is the close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

/// Where a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Retrieved from the external market-data source.
    Live,
    /// Produced by the synthetic generator after retrieval failed.
    Synthetic,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Synthetic => "synthetic",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("price series for '{symbol}' has no records")]
    Empty { symbol: String },
}

/// Non-empty daily series, ascending by date, no duplicate dates.
///
/// Construction canonicalizes the records (stable sort by date, first record
/// wins on a duplicate date), so every `PriceSeries` in circulation already
/// satisfies the ordering invariant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
    data_source: DataSource,
    resolved_symbol: String,
}

impl PriceSeries {
    pub fn new(
        mut records: Vec<PriceRecord>,
        data_source: DataSource,
        resolved_symbol: impl Into<String>,
    ) -> Result<Self, SeriesError> {
        let resolved_symbol = resolved_symbol.into();
        if records.is_empty() {
            return Err(SeriesError::Empty {
                symbol: resolved_symbol,
            });
        }

        records.sort_by_key(|r| r.date);
        records.dedup_by_key(|r| r.date);

        Ok(Self {
            records,
            data_source,
            resolved_symbol,
        })
    }

    /// Wrap records that are already non-empty, ascending and unique.
    ///
    /// Only the synthetic generator uses this; it builds its dates from a
    /// business-day calendar that starts with a guaranteed first day.
    pub(crate) fn from_canonical(
        records: Vec<PriceRecord>,
        data_source: DataSource,
        resolved_symbol: String,
    ) -> Self {
        debug_assert!(!records.is_empty());
        debug_assert!(records.windows(2).all(|w| w[0].date < w[1].date));
        Self {
            records,
            data_source,
            resolved_symbol,
        }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn data_source(&self) -> DataSource {
        self.data_source
    }

    pub fn resolved_symbol(&self) -> &str {
        &self.resolved_symbol
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.price).collect()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }
}
