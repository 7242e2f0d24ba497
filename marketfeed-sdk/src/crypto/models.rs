use std::collections::HashMap;

use serde::Deserialize;

/// Quote for a single cryptocurrency in one conversion currency.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CryptoQuote {
    price: Option<f64>,
    percent_change_24h: Option<f64>,
    volume_24h: Option<f64>,
    market_cap: Option<f64>,
}

impl CryptoQuote {
    /// Latest price in the conversion currency.
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// Percent change over the trailing 24 hours.
    pub fn percent_change_24h(&self) -> Option<f64> {
        self.percent_change_24h
    }

    /// Traded volume over the trailing 24 hours, in the conversion currency.
    pub fn volume_24h(&self) -> Option<f64> {
        self.volume_24h
    }

    /// Market capitalization in the conversion currency.
    pub fn market_cap(&self) -> Option<f64> {
        self.market_cap
    }
}

/// Per-symbol entry in the batch quote response.
///
/// The provider nests one quote per requested conversion currency under `quote`.
#[derive(Deserialize, Debug, Clone)]
pub struct CryptoQuoteEntry {
    #[serde(default)]
    quote: HashMap<String, CryptoQuote>,
}

impl CryptoQuoteEntry {
    /// Quote in the given conversion currency, if the provider returned one.
    pub fn quote_in(&self, convert: &str) -> Option<&CryptoQuote> {
        self.quote.get(&convert.to_uppercase())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub(super) struct CryptoResponseStatus {
    pub error_code: i64,
    pub error_message: Option<String>,
}

/// Batch quote response keyed by symbol.
#[derive(Deserialize, Debug, Clone)]
pub struct CryptoQuotesResponse {
    pub(super) status: CryptoResponseStatus,
    #[serde(default)]
    data: HashMap<String, CryptoQuoteEntry>,
}

impl CryptoQuotesResponse {
    /// Flattens the response into symbol → quote for the given conversion currency.
    ///
    /// Symbols the provider did not recognize, or without a quote in `convert`, are omitted.
    pub fn quotes_in(&self, convert: &str) -> HashMap<String, CryptoQuote> {
        self.data
            .iter()
            .filter_map(|(symbol, entry)| {
                entry
                    .quote_in(convert)
                    .map(|quote| (symbol.to_uppercase(), quote.clone()))
            })
            .collect()
    }
}
