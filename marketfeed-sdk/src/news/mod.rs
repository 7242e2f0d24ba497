//! Client for news feed endpoints.

mod client;
pub mod models;
mod path;
mod repository;

pub use client::RestClient;
pub use repository::NewsFeedRepository;
