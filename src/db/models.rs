use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    shared::{
        AssetKind, PredictionHorizon, SentimentScore, SentimentSource, SubscriptionPlan,
        TickerSymbol,
    },
    util::DateTimeExt,
};

/// Database row representing a tradable instrument in the catalog.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssetRow {
    pub id: Uuid,
    pub ticker: String,
    pub name: String,
    pub kind: AssetKind,
    pub market_cap: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl AssetRow {
    /// Returns a formatted string representation of the asset data for display purposes.
    pub fn as_data_str(&self) -> String {
        let market_cap_str = match self.market_cap {
            Some(cap) => format!("{cap:.0}"),
            None => "-".to_string(),
        };

        format!(
            "ticker: {}\nname: {}\nkind: {}\nmarket_cap: {market_cap_str}",
            self.ticker, self.name, self.kind
        )
    }
}

impl fmt::Display for AssetRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Asset Row:")?;
        for line in self.as_data_str().lines() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

/// Input payload for creating a catalog entry.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub ticker: TickerSymbol,
    pub name: String,
    pub kind: AssetKind,
    pub market_cap: Option<f64>,
}

/// Database row representing a single OHLCV observation for an asset.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HistoricalPriceRow {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub created_at: DateTime<Utc>,
}

impl HistoricalPriceRow {
    /// Returns a formatted string representation of the price data for display purposes.
    pub fn as_data_str(&self) -> String {
        format!(
            "time: {}\nopen: {:.2}\nhigh: {:.2}\nlow: {:.2}\nclose: {:.2}\nvolume: {}",
            self.time.format_local_millis(),
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume
        )
    }
}

impl fmt::Display for HistoricalPriceRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Historical Price Row:")?;
        for line in self.as_data_str().lines() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

/// Input payload for one OHLCV observation.
#[derive(Debug, Clone)]
pub struct NewHistoricalPrice {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl NewHistoricalPrice {
    /// Returns `true` if the entry satisfies OHLC bounds.
    pub fn is_ohlc_consistent(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }
}

/// Database row representing a forward-looking price estimate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PricePredictionRow {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub horizon: PredictionHorizon,
    pub prediction_date: DateTime<Utc>,
    pub predicted_price: f64,
    pub confidence: f64,
    pub model_version: String,
    pub created_at: DateTime<Utc>,
}

impl PricePredictionRow {
    /// Returns a formatted string representation of the prediction for display purposes.
    pub fn as_data_str(&self) -> String {
        format!(
            "horizon: {}\nprediction_date: {}\npredicted_price: {:.2}\nconfidence: {:.2}\nmodel_version: {}",
            self.horizon,
            self.prediction_date.format_local_millis(),
            self.predicted_price,
            self.confidence,
            self.model_version
        )
    }
}

impl fmt::Display for PricePredictionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price Prediction Row:")?;
        for line in self.as_data_str().lines() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

/// Database row holding the recomputed technical stats of one asset.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssetStatsRow {
    pub asset_id: Uuid,
    pub volatility: Option<f64>,
    pub rsi: Option<f64>,
    pub ma_50: Option<f64>,
    pub ma_200: Option<f64>,
    pub last_updated: DateTime<Utc>,
}

/// Database row representing a news article, optionally linked to an asset.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NewsArticleRow {
    pub id: Uuid,
    pub asset_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input payload for a news article.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub asset_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
}

/// Database row representing one sentiment observation for an asset.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SentimentRow {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub score: f64,
    pub source_kind: SentimentSource,
    pub analysis_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input payload for a sentiment observation.
#[derive(Debug, Clone)]
pub struct NewSentiment {
    pub asset_id: Uuid,
    pub score: SentimentScore,
    pub source_kind: SentimentSource,
    pub analysis_date: DateTime<Utc>,
}

/// Database row representing a user's platform profile.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: SubscriptionPlan,
    pub created_at: DateTime<Utc>,
}

/// Database row recording that a user viewed a prediction.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PredictionViewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub prediction_id: Uuid,
    pub viewed_at: DateTime<Utc>,
}

/// Database row representing a submitted contact-form message.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactMessageRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub topic: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Input payload for a contact-form message.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub topic: String,
    pub message: String,
}

/// Composed read model for one asset: the detail surface the presentation layer renders.
#[derive(Debug, Clone)]
pub struct AssetOverview {
    pub asset: AssetRow,
    pub latest_price: Option<HistoricalPriceRow>,
    pub stats: Option<AssetStatsRow>,
    pub predictions: Vec<PricePredictionRow>,
    pub recent_news: Vec<NewsArticleRow>,
    pub latest_sentiment: Option<SentimentRow>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn price(open: f64, high: f64, low: f64, close: f64) -> NewHistoricalPrice {
        NewHistoricalPrice {
            time: Utc::now(),
            open,
            high,
            low,
            close,
            volume: 0,
        }
    }

    #[test]
    fn ohlc_consistency_accepts_valid_entries() {
        assert!(price(10., 12., 9., 11.).is_ohlc_consistent());
        // Flat candle
        assert!(price(10., 10., 10., 10.).is_ohlc_consistent());
    }

    #[test]
    fn ohlc_consistency_rejects_high_below_close() {
        assert!(!price(10., 10.5, 9., 11.).is_ohlc_consistent());
    }

    #[test]
    fn ohlc_consistency_rejects_low_above_open() {
        assert!(!price(10., 12., 10.5, 11.).is_ohlc_consistent());
    }
}
