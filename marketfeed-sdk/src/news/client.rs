use std::sync::Arc;

use crate::shared::{
    config::RestClientConfig,
    rest::{
        base::{ApiKeyAuth, RestBase},
        error::Result,
    },
};

use super::repository::{HttpNewsFeedRepository, NewsFeedRepository};

/// Client for a news feed REST API.
///
/// The provider expects the API key as an `apikey` query parameter.
pub struct RestClient {
    /// Methods for fetching the latest articles.
    pub feed: Box<dyn NewsFeedRepository>,
}

impl RestClient {
    /// Creates a new news feed client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// use std::env;
    /// use marketfeed_sdk::{RestClientConfig, news};
    ///
    /// let base_url = env::var("NEWS_API_URL").unwrap();
    /// let api_key = env::var("NEWS_API_KEY").unwrap();
    ///
    /// let api = news::RestClient::new(RestClientConfig::default(), base_url, api_key)?;
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
            ApiKeyAuth::QueryParam("apikey"),
        )?;

        let feed = Box::new(HttpNewsFeedRepository::new(base));

        Ok(Arc::new(Self { feed }))
    }
}
