use std::sync::Arc;

use crate::shared::{
    config::RestClientConfig,
    rest::{
        base::{ApiKeyAuth, RestBase},
        error::Result,
    },
};

use super::repository::{HttpStockQuotesRepository, StockQuotesRepository};

/// Client for a stock market-data REST API.
///
/// The provider expects the API key as a `token` query parameter.
pub struct RestClient {
    /// Methods for fetching quotes and historical candles.
    pub quotes: Box<dyn StockQuotesRepository>,
}

impl RestClient {
    /// Creates a new stock data client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// use std::env;
    /// use marketfeed_sdk::{RestClientConfig, stocks};
    ///
    /// let base_url = env::var("STOCKS_API_URL").unwrap();
    /// let api_key = env::var("STOCKS_API_KEY").unwrap();
    ///
    /// let api = stocks::RestClient::new(RestClientConfig::default(), base_url, api_key)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        config: RestClientConfig,
        base_url: impl ToString,
        api_key: impl ToString,
    ) -> Result<Arc<Self>> {
        let base = RestBase::new(
            config,
            base_url.to_string(),
            api_key.to_string(),
            ApiKeyAuth::QueryParam("token"),
        )?;

        let quotes = Box::new(HttpStockQuotesRepository::new(base));

        Ok(Arc::new(Self { quotes }))
    }
}
