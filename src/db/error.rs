use std::result;

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Connection error: {0}")]
    Connection(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(sqlx::migrate::MigrateError),

    #[error("Query error: {0}")]
    Query(sqlx::Error),

    #[error("Transaction begin error: {0}")]
    TransactionBegin(sqlx::Error),

    #[error("Transaction commit error: {0}")]
    TransactionCommit(sqlx::Error),

    #[error(
        "Price entry at {time} violates OHLC bounds: high must be >= max(open, close) and low <= min(open, close)"
    )]
    InvalidOhlcRange { time: DateTime<Utc> },

    #[error("Price entries must have times aligned to day buckets (midnight UTC), got {time}")]
    PriceTimeNotDayAligned { time: DateTime<Utc> },

    #[error("Asset with ticker `{ticker}` was not found")]
    AssetNotFound { ticker: String },
}

pub type Result<T> = result::Result<T, DbError>;
