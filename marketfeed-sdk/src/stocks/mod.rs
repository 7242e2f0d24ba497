//! Client for stock quote and candle endpoints.

mod client;
pub mod models;
mod path;
mod repository;

pub use client::RestClient;
pub use repository::StockQuotesRepository;
