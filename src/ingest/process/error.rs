use std::result;

use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;

use crate::db::error::DbError;

use super::{
    analytics_task::error::AnalyticsError, market_data_task::error::MarketDataError,
    news_feed_task::error::NewsFeedError,
};

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestProcessRecoverableError {
    #[error("[Db] {0}")]
    Db(#[from] DbError),

    #[error("[MarketData] {0}")]
    MarketData(#[from] MarketDataError),

    #[error("[NewsFeed] {0}")]
    NewsFeed(#[from] NewsFeedError),

    #[error("[Analytics] {0}")]
    Analytics(#[from] AnalyticsError),
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestProcessFatalError {
    #[error("Shutdown signal channel recv error: {0}")]
    ShutdownSignalRecv(RecvError),
}

#[derive(Error, Debug)]
pub enum IngestProcessError {
    #[error(transparent)]
    Recoverable(#[from] IngestProcessRecoverableError),

    #[error(transparent)]
    Fatal(#[from] IngestProcessFatalError),
}

pub(super) type Result<T> = result::Result<T, IngestProcessError>;
