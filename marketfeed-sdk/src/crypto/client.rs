use std::sync::Arc;

use crate::shared::{
    config::RestClientConfig,
    rest::{
        base::{ApiKeyAuth, RestBase},
        error::Result,
    },
};

use super::repository::{CryptoQuotesRepository, HttpCryptoQuotesRepository};

/// Client for a cryptocurrency market-data REST API.
///
/// The provider expects the API key in an `X-CMC_PRO_API_KEY` request header.
pub struct RestClient {
    /// Methods for fetching batch quotes.
    pub quotes: Box<dyn CryptoQuotesRepository>,
}

impl RestClient {
    /// Creates a new cryptocurrency data client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// use std::env;
    /// use marketfeed_sdk::{RestClientConfig, crypto};
    ///
    /// let base_url = env::var("CRYPTO_API_URL").unwrap();
    /// let api_key = env::var("CRYPTO_API_KEY").unwrap();
    ///
    /// let api = crypto::RestClient::new(RestClientConfig::default(), base_url, api_key)?;
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
            ApiKeyAuth::Header("x-cmc_pro_api_key"),
        )?;

        let quotes = Box::new(HttpCryptoQuotesRepository::new(base));

        Ok(Arc::new(Self { quotes }))
    }
}
