use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::shared::rest::{base::RestBase, error::Result};

use super::{
    models::{CandleResolution, StockCandleSeries, StockQuote},
    path::StocksRestPath,
};

/// Methods for fetching stock quotes and historical candles.
///
/// This trait is sealed and not meant to be implemented outside of `marketfeed-sdk`.
#[async_trait]
pub trait StockQuotesRepository: crate::sealed::Sealed + Send + Sync {
    /// Fetches the current quote for a single symbol.
    async fn get_quote(&self, symbol: &str) -> Result<StockQuote>;

    /// Fetches historical candles for a symbol over a time range.
    async fn get_candles(
        &self,
        symbol: &str,
        resolution: CandleResolution,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<StockCandleSeries>;
}

pub(super) struct HttpStockQuotesRepository {
    base: Arc<RestBase>,
}

impl HttpStockQuotesRepository {
    pub fn new(base: Arc<RestBase>) -> Self {
        Self { base }
    }
}

impl crate::sealed::Sealed for HttpStockQuotesRepository {}

#[async_trait]
impl StockQuotesRepository for HttpStockQuotesRepository {
    async fn get_quote(&self, symbol: &str) -> Result<StockQuote> {
        let query_params = [("symbol", symbol.to_uppercase())];

        self.base.get(StocksRestPath::Quote, &query_params).await
    }

    async fn get_candles(
        &self,
        symbol: &str,
        resolution: CandleResolution,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<StockCandleSeries> {
        let query_params = [
            ("symbol", symbol.to_uppercase()),
            ("resolution", resolution.to_string()),
            ("from", from.timestamp().to_string()),
            ("to", to.timestamp().to_string()),
        ];

        self.base
            .get(StocksRestPath::StockCandle, &query_params)
            .await
    }
}

#[cfg(test)]
mod tests;
