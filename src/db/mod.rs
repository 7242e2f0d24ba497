use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

pub(crate) mod error;
pub(crate) mod models;
mod postgres;
pub(crate) mod repositories;

use error::{DbError, Result};
use models::AssetOverview;
use postgres::{
    assets::PgAssetsRepo, contact_messages::PgContactMessagesRepo,
    historical_prices::PgPricesRepo, news::PgNewsRepo, predictions::PgPredictionsRepo,
    stats::PgStatsRepo, user_profiles::PgProfilesRepo,
};
use repositories::{
    AssetsRepository, ContactMessagesRepository, NewsRepository, PredictionsRepository,
    PricesRepository, ProfilesRepository, StatsRepository,
};

use crate::shared::PredictionHorizon;

/// Primary database interface for the asset analytics store.
///
/// Provides access to repositories for the asset catalog, price history, predictions,
/// technical stats, news and sentiment, user profiles and contact messages. Uses PostgreSQL
/// as the underlying storage engine with automatic migrations.
pub struct Database {
    /// Asset catalog operations.
    pub assets: Box<dyn AssetsRepository>,
    /// OHLCV price history operations.
    pub prices: Box<dyn PricesRepository>,
    /// Price prediction and view-log operations.
    pub predictions: Box<dyn PredictionsRepository>,
    /// Technical stats operations.
    pub stats: Box<dyn StatsRepository>,
    /// News article and sentiment operations.
    pub news: Box<dyn NewsRepository>,
    /// User profile, plan and favorites operations.
    pub profiles: Box<dyn ProfilesRepository>,
    /// Contact-form message operations.
    pub contact_messages: Box<dyn ContactMessagesRepository>,
}

impl Database {
    const OVERVIEW_NEWS_LIMIT: i64 = 5;

    /// Creates a new database instance and runs migrations.
    ///
    /// Establishes a connection pool to the PostgreSQL database and automatically applies any
    /// pending migrations. Returns an error if the connection fails or migrations cannot be
    /// applied.
    pub async fn new(postgres_db_url: &str) -> Result<Arc<Self>> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(postgres_db_url)
            .await
            .map_err(DbError::Connection)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(DbError::Migration)?;

        let pool = Arc::new(pool);
        let assets = Box::new(PgAssetsRepo::new(pool.clone()));
        let prices = Box::new(PgPricesRepo::new(pool.clone()));
        let predictions = Box::new(PgPredictionsRepo::new(pool.clone()));
        let stats = Box::new(PgStatsRepo::new(pool.clone()));
        let news = Box::new(PgNewsRepo::new(pool.clone()));
        let profiles = Box::new(PgProfilesRepo::new(pool.clone()));
        let contact_messages = Box::new(PgContactMessagesRepo::new(pool));

        Ok(Arc::new(Self {
            assets,
            prices,
            predictions,
            stats,
            news,
            profiles,
            contact_messages,
        }))
    }

    /// Composed read contract for one asset's detail surface: the latest price, stats,
    /// predictions for every horizon, recent news and the latest sentiment.
    pub async fn asset_overview(&self, ticker: &str) -> Result<AssetOverview> {
        let asset =
            self.assets
                .get_by_ticker(ticker)
                .await?
                .ok_or_else(|| DbError::AssetNotFound {
                    ticker: ticker.to_string(),
                })?;

        let latest_price = self.prices.get_latest(asset.id).await?;
        let stats = self.stats.get_for_asset(asset.id).await?;
        let predictions = self
            .predictions
            .latest_for_asset(asset.id, &PredictionHorizon::ALL)
            .await?;
        let recent_news = self
            .news
            .list_for_asset(asset.id, Self::OVERVIEW_NEWS_LIMIT)
            .await?;
        let latest_sentiment = self.news.latest_sentiment_for_asset(asset.id).await?;

        Ok(AssetOverview {
            asset,
            latest_price,
            stats,
            predictions,
            recent_news,
            latest_sentiment,
        })
    }

    /// Latest predictions for one asset as visible to the given user.
    ///
    /// The user's subscription plan restricts the horizon set; the profile is created with
    /// the default plan if the user has none yet.
    pub async fn predictions_for_user(
        &self,
        user_id: Uuid,
        ticker: &str,
    ) -> Result<Vec<models::PricePredictionRow>> {
        let profile = self.profiles.ensure_profile(user_id).await?;

        let asset =
            self.assets
                .get_by_ticker(ticker)
                .await?
                .ok_or_else(|| DbError::AssetNotFound {
                    ticker: ticker.to_string(),
                })?;

        self.predictions
            .latest_for_asset(asset.id, profile.plan.allowed_horizons())
            .await
    }
}

#[cfg(test)]
mod tests;
