#![doc = include_str!("../README.md")]

mod db;
/// Exports [`IngestEngine`] and other types related to background data ingestion.
///
/// [`IngestEngine`]: crate::ingest::IngestEngine
pub mod ingest;
/// Exports the [`Predictor`] trait and the default [`RandomWalkPredictor`].
///
/// [`Predictor`]: crate::predict::Predictor
/// [`RandomWalkPredictor`]: crate::predict::RandomWalkPredictor
pub mod predict;
mod shared;
/// Exports [`AssetStatsEvaluator`] and other types related to technical stats.
///
/// [`AssetStatsEvaluator`]: crate::stats::AssetStatsEvaluator
pub mod stats;
/// Exports [`DashboardTui`] and other types related to the terminal dashboard.
///
/// [`DashboardTui`]: crate::tui::DashboardTui
pub mod tui;
mod util;

pub use db::Database;

/// Error types returned by `marketscope`.
pub mod error {
    pub use super::db::error::DbError;
    pub use super::ingest::{
        error::IngestError,
        process::{
            analytics_task::error::AnalyticsError,
            error::{IngestProcessError, IngestProcessFatalError, IngestProcessRecoverableError},
            market_data_task::error::MarketDataError,
            news_feed_task::error::NewsFeedError,
        },
    };
    pub use super::predict::error::PredictError;
    pub use super::shared::error::{
        ConfidenceScoreValidationError, SentimentScoreValidationError,
        TickerSymbolValidationError,
    };
    pub use super::stats::error::StatsError;
    pub use super::tui::TuiError;

    // Re-export selected `marketfeed-sdk` errors for convenience
    pub use marketfeed_sdk::error::{CandleSeriesError, RestApiError};

    /// Convenience general-purpose Result type alias.
    pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
}

/// Exports database models and shared domain types.
pub mod models {
    pub use super::db::models::{
        AssetOverview, AssetRow, AssetStatsRow, ContactMessageRow, HistoricalPriceRow, NewArticle,
        NewAsset, NewContactMessage, NewHistoricalPrice, NewSentiment, NewsArticleRow,
        PredictionViewRow, PricePredictionRow, SentimentRow, UserProfileRow,
    };
    pub use super::shared::{
        AssetKind, ConfidenceScore, PredictionHorizon, SentimentScore, SentimentSource,
        SubscriptionPlan, TickerSymbol,
    };
}

/// Exports the repository traits behind [`Database`]'s fields.
pub mod repositories {
    pub use super::db::repositories::{
        AssetsRepository, ContactMessagesRepository, NewsRepository, PredictionsRepository,
        PricesRepository, ProfilesRepository, StatsRepository,
    };
}
