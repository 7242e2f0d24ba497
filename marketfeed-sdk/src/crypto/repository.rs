use std::sync::Arc;

use async_trait::async_trait;

use crate::shared::rest::{
    base::RestBase,
    error::{RestApiError, Result},
};

use super::{models::CryptoQuotesResponse, path::CryptoRestPath};

/// Methods for fetching batch cryptocurrency quotes.
///
/// This trait is sealed and not meant to be implemented outside of `marketfeed-sdk`.
#[async_trait]
pub trait CryptoQuotesRepository: crate::sealed::Sealed + Send + Sync {
    /// Fetches current quotes for a batch of symbols, converted to `convert`.
    ///
    /// The provider accepts a comma-separated symbol list and returns one entry per recognized
    /// symbol. An in-body error status is surfaced as [`RestApiError::Provider`].
    async fn get_quotes(&self, symbols: &[String], convert: &str) -> Result<CryptoQuotesResponse>;
}

pub(super) struct HttpCryptoQuotesRepository {
    base: Arc<RestBase>,
}

impl HttpCryptoQuotesRepository {
    pub fn new(base: Arc<RestBase>) -> Self {
        Self { base }
    }
}

impl crate::sealed::Sealed for HttpCryptoQuotesRepository {}

#[async_trait]
impl CryptoQuotesRepository for HttpCryptoQuotesRepository {
    async fn get_quotes(&self, symbols: &[String], convert: &str) -> Result<CryptoQuotesResponse> {
        let symbol_list = symbols
            .iter()
            .map(|s| s.to_uppercase())
            .collect::<Vec<_>>()
            .join(",");

        let query_params = [
            ("symbol", symbol_list),
            ("convert", convert.to_uppercase()),
        ];

        let response: CryptoQuotesResponse = self
            .base
            .get(CryptoRestPath::QuotesLatest, &query_params)
            .await?;

        if response.status.error_code != 0 {
            return Err(RestApiError::Provider {
                code: response.status.error_code,
                message: response
                    .status
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "unknown provider error".to_string()),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests;
