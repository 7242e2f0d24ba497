#![doc = include_str!("../README.md")]

/// Exports the cryptocurrency quotes client and related types.
pub mod crypto;
/// Exports the news feed client and related types.
pub mod news;
mod shared;
/// Exports the stock quotes client and related types.
pub mod stocks;

pub use shared::config::RestClientConfig;

/// Error types returned by `marketfeed-sdk`.
pub mod error {
    pub use super::shared::rest::error::RestApiError;

    pub use super::stocks::models::CandleSeriesError;
}

/// Exports the response models of every provider client.
pub mod models {
    pub use super::crypto::models::{CryptoQuote, CryptoQuoteEntry, CryptoQuotesResponse};
    pub use super::news::models::{NewsArticle, NewsFeed};
    pub use super::stocks::models::{CandleResolution, StockCandle, StockCandleSeries, StockQuote};
}

mod sealed {
    pub trait Sealed {}
}
