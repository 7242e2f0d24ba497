use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    predict::PredictionOutcome,
    shared::{AssetKind, PredictionHorizon, SubscriptionPlan},
    stats::AssetStatsValues,
};

use super::{
    error::Result,
    models::{
        AssetRow, AssetStatsRow, ContactMessageRow, HistoricalPriceRow, NewArticle, NewAsset,
        NewContactMessage, NewHistoricalPrice, NewSentiment, NewsArticleRow, PredictionViewRow,
        PricePredictionRow, SentimentRow, UserProfileRow,
    },
};

#[async_trait]
pub trait AssetsRepository: Send + Sync {
    /// Creates the asset if its ticker is not yet in the catalog and returns the stored row.
    ///
    /// The kind of an existing asset is never changed.
    async fn ensure_asset(&self, new_asset: &NewAsset) -> Result<AssetRow>;

    async fn get_by_ticker(&self, ticker: &str) -> Result<Option<AssetRow>>;

    async fn list_all(&self) -> Result<Vec<AssetRow>>;

    async fn list_by_kind(&self, kind: AssetKind) -> Result<Vec<AssetRow>>;

    async fn update_market_cap(&self, asset_id: Uuid, market_cap: Option<f64>) -> Result<()>;

    /// Removes the asset; prices, predictions, stats, news links, sentiments and favorites
    /// cascade.
    async fn remove_asset(&self, asset_id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait PricesRepository: Send + Sync {
    /// Adds OHLCV entries for one asset in a single batch statement.
    /// Uses INSERT ON CONFLICT DO UPDATE keyed on (asset_id, time), so re-ingesting a
    /// period refreshes it instead of duplicating rows.
    ///
    /// Entries violating OHLC bounds are rejected before anything is written.
    async fn add_prices(&self, asset_id: Uuid, new_prices: &[NewHistoricalPrice]) -> Result<()>;

    async fn get_latest(&self, asset_id: Uuid) -> Result<Option<HistoricalPriceRow>>;

    async fn get_range_from(
        &self,
        asset_id: Uuid,
        from: DateTime<Utc>,
    ) -> Result<Vec<HistoricalPriceRow>>;

    /// Trailing close series for indicator input: at most `limit` closes, oldest first.
    async fn get_closes(&self, asset_id: Uuid, limit: i64) -> Result<Vec<f64>>;

    async fn count_for_asset(&self, asset_id: Uuid) -> Result<i64>;
}

#[async_trait]
pub trait PredictionsRepository: Send + Sync {
    /// Stores a prediction, idempotent on (asset, horizon, target day).
    ///
    /// The outcome's prediction date is floored to its day, and a conflicting row from an
    /// earlier run of the same day is overwritten in place.
    async fn upsert_prediction(
        &self,
        asset_id: Uuid,
        outcome: &PredictionOutcome,
    ) -> Result<PricePredictionRow>;

    /// Latest stored prediction per horizon, restricted to `allowed` horizons.
    async fn latest_for_asset(
        &self,
        asset_id: Uuid,
        allowed: &[PredictionHorizon],
    ) -> Result<Vec<PricePredictionRow>>;

    async fn list_recent(&self, limit: i64) -> Result<Vec<PricePredictionRow>>;

    /// Appends a view-log entry; the log is never updated in place.
    async fn record_view(&self, user_id: Uuid, prediction_id: Uuid) -> Result<PredictionViewRow>;

    async fn recent_views(&self, user_id: Uuid, limit: i64) -> Result<Vec<PredictionViewRow>>;
}

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Overwrites the single stats row of the asset; stats are recomputed, not historized.
    async fn upsert_stats(&self, asset_id: Uuid, values: &AssetStatsValues) -> Result<()>;

    async fn get_for_asset(&self, asset_id: Uuid) -> Result<Option<AssetStatsRow>>;
}

#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Adds articles in a single batch, ignoring entries whose (title, source) pair is
    /// already stored.
    ///
    /// Returns only the articles that were actually inserted.
    async fn add_articles(&self, new_articles: &[NewArticle]) -> Result<Vec<NewsArticleRow>>;

    async fn list_recent(&self, limit: i64) -> Result<Vec<NewsArticleRow>>;

    async fn list_for_asset(&self, asset_id: Uuid, limit: i64) -> Result<Vec<NewsArticleRow>>;

    async fn add_sentiment(&self, new_sentiment: &NewSentiment) -> Result<SentimentRow>;

    async fn list_recent_sentiments(&self, limit: i64) -> Result<Vec<SentimentRow>>;

    async fn latest_sentiment_for_asset(&self, asset_id: Uuid) -> Result<Option<SentimentRow>>;
}

#[async_trait]
pub trait ProfilesRepository: Send + Sync {
    /// Creates the user's profile with the default plan if it does not exist yet.
    ///
    /// A user has exactly one profile; repeated calls return the same row.
    async fn ensure_profile(&self, user_id: Uuid) -> Result<UserProfileRow>;

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfileRow>>;

    async fn set_plan(&self, user_id: Uuid, plan: SubscriptionPlan) -> Result<()>;

    /// Adds the asset to the favorites set, or removes it if already present.
    /// The (profile, asset) pair is unique, so double adds cannot create duplicates.
    ///
    /// Returns `true` if the asset is a favorite after the call.
    async fn toggle_favorite(&self, profile_id: Uuid, asset_id: Uuid) -> Result<bool>;

    async fn list_favorites(&self, profile_id: Uuid) -> Result<Vec<AssetRow>>;
}

#[async_trait]
pub trait ContactMessagesRepository: Send + Sync {
    async fn add_message(&self, new_message: &NewContactMessage) -> Result<ContactMessageRow>;

    async fn list_recent(&self, limit: i64) -> Result<Vec<ContactMessageRow>>;
}
