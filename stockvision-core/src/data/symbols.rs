//! Ticker normalization and exchange-suffix resolution.
//!
//! The dashboard mostly deals in NSE tickers typed without a suffix ("TCS"),
//! which Yahoo only knows as "TCS.NS". Known domestic tickers get the suffix up
//! front; unknown unsuffixed tickers get one retry with it (see the provider).

use serde::{Deserialize, Serialize};

/// Domestic tickers resolved to the domestic exchange without a lookup.
pub const DEFAULT_DOMESTIC_TICKERS: &[&str] = &[
    "TCS", "INFY", "WIPRO", "HCLTECH", "TECHM", "HDFCBANK", "ICICIBANK", "SBIN", "KOTAKBANK",
    "AXISBANK", "BAJFINANCE", "RELIANCE", "POWERGRID", "NTPC", "ONGC", "LT", "ADANIENT",
    "HINDUNILVR", "ITC", "TITAN", "ASIANPAINT", "MARUTI", "TATAMOTORS", "BHARTIARTL", "SUNPHARMA",
    "DRREDDY", "CIPLA", "ZOMATO", "PAYTM", "NYKAA", "POLICYBZR", "LICI", "JIOFIN", "ADANIPOWER",
    "ADANIGREEN", "ADANIPORTS", "TATASTEEL", "JSWSTEEL", "GRASIM", "ULTRACEMCO", "NESTLEIND",
    "BAJAJFINSV", "HEROMOTOCO", "M&M", "EICHERMOT", "COALINDIA", "BPCL",
];

/// Exchange configuration owned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Suffix appended for the domestic exchange (".NS").
    pub domestic_suffix: String,
    /// Suffixes that mark a symbol as already exchange-qualified.
    pub recognized_suffixes: Vec<String>,
    /// Bare tickers that always resolve to the domestic exchange.
    pub domestic_tickers: Vec<String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            domestic_suffix: ".NS".to_string(),
            recognized_suffixes: vec![".NS".to_string(), ".BO".to_string()],
            domestic_tickers: DEFAULT_DOMESTIC_TICKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ExchangeConfig {
    /// Trim whitespace and uppercase.
    pub fn normalize(symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }

    /// True if the (normalized) symbol ends with a recognized exchange suffix.
    pub fn has_suffix(&self, symbol: &str) -> bool {
        self.recognized_suffixes
            .iter()
            .any(|suffix| symbol.ends_with(suffix.as_str()))
    }

    /// The symbol with any recognized exchange suffix removed.
    pub fn base_symbol<'a>(&self, symbol: &'a str) -> &'a str {
        self.recognized_suffixes
            .iter()
            .find_map(|suffix| symbol.strip_suffix(suffix.as_str()))
            .unwrap_or(symbol)
    }

    pub fn is_domestic(&self, base: &str) -> bool {
        self.domestic_tickers.iter().any(|t| t == base)
    }

    pub fn with_domestic_suffix(&self, symbol: &str) -> String {
        format!("{}{}", self.base_symbol(symbol), self.domestic_suffix)
    }

    /// First symbol to try against the live source.
    ///
    /// Normalizes, then appends the domestic suffix when the bare ticker is a
    /// known domestic one and no suffix was given.
    pub fn resolve(&self, symbol: &str) -> String {
        let normalized = Self::normalize(symbol);
        if !self.has_suffix(&normalized) && self.is_domestic(self.base_symbol(&normalized)) {
            self.with_domestic_suffix(&normalized)
        } else {
            normalized
        }
    }
}
