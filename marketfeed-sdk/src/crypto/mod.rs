//! Client for cryptocurrency quote endpoints.

mod client;
pub mod models;
mod path;
mod repository;

pub use client::RestClient;
pub use repository::CryptoQuotesRepository;
