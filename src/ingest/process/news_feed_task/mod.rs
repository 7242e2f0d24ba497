use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tokio::time;
use uuid::Uuid;

use marketfeed_sdk::{models::NewsArticle, news};

use crate::{
    db::{
        Database,
        models::{AssetRow, NewArticle, NewSentiment},
    },
    shared::{AssetKind, SentimentScore, SentimentSource},
};

use super::super::config::{IngestProcessConfig, NewsFeedTaskConfig};

pub(crate) mod error;

use error::{NewsFeedError, Result};

/// Outcome counters of one news-and-sentiment pass.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NewsFeedReport {
    pub articles_fetched: usize,
    pub articles_stored: usize,
    pub sentiments_stored: usize,
}

pub(super) struct NewsFeedTask {
    config: NewsFeedTaskConfig,
    db: Arc<Database>,
    api_news: Arc<news::RestClient>,
}

impl NewsFeedTask {
    const TITLE_MAX_LEN: usize = 200;
    const CONTENT_MAX_LEN: usize = 5_000;

    /// How many leading provider keywords are checked against catalog tickers.
    const KEYWORD_MATCH_LIMIT: usize = 3;

    pub fn new(
        config: &IngestProcessConfig,
        db: Arc<Database>,
        api_news: Arc<news::RestClient>,
    ) -> Self {
        Self {
            config: config.into(),
            db,
            api_news,
        }
    }

    pub async fn run(self, assets: &[AssetRow]) -> Result<NewsFeedReport> {
        let mut report = NewsFeedReport::default();

        let feed = self.fetch_latest().await?;

        if !feed.is_success() {
            return Err(NewsFeedError::ProviderStatusNotSuccess {
                status: feed.status().to_string(),
            });
        }

        let articles = feed.into_results();
        report.articles_fetched = articles.len();

        let new_articles: Vec<NewArticle> = articles
            .iter()
            .take(self.config.news_article_limit())
            .filter_map(|article| Self::map_article(article, assets))
            .collect();

        report.articles_stored = self.db.news.add_articles(&new_articles).await?.len();

        report.sentiments_stored = self.synthesize_crypto_sentiments(assets).await?;

        Ok(report)
    }

    /// Maps a provider article to a store payload, attaching it to a catalog asset when one
    /// of the leading keywords names a ticker.
    ///
    /// Articles without a title or link are dropped.
    fn map_article(article: &NewsArticle, assets: &[AssetRow]) -> Option<NewArticle> {
        let title: String = article.title()?.chars().take(Self::TITLE_MAX_LEN).collect();
        if title.is_empty() {
            return None;
        }

        let source = article.link()?.to_string();
        if source.is_empty() {
            return None;
        }

        let content: String = article
            .body()
            .unwrap_or_default()
            .chars()
            .take(Self::CONTENT_MAX_LEN)
            .collect();

        Some(NewArticle {
            asset_id: Self::match_asset(article.keywords(), assets),
            title,
            content,
            source,
            published_at: article.published_at().unwrap_or_else(Utc::now),
        })
    }

    fn match_asset(keywords: &[String], assets: &[AssetRow]) -> Option<Uuid> {
        for keyword in keywords.iter().take(Self::KEYWORD_MATCH_LIMIT) {
            let needle = keyword.trim().to_uppercase();

            if let Some(asset) = assets.iter().find(|a| a.ticker == needle) {
                return Some(asset.id);
            }
        }

        None
    }

    /// Stores one synthetic sentiment observation per crypto asset.
    ///
    /// Stands in for a real sentiment pipeline; scores are uniform in [0, 1] with a random
    /// source kind.
    async fn synthesize_crypto_sentiments(&self, assets: &[AssetRow]) -> Result<usize> {
        let analysis_date = Utc::now();
        let mut stored = 0;

        for asset in assets.iter().filter(|a| a.kind == AssetKind::Crypto) {
            let (score, source_kind) = {
                let mut rng = rand::rng();

                let score = SentimentScore::try_from(rng.random_range(0. ..=1.))
                    .expect("drawn score is within the valid range");
                let source_kind =
                    SentimentSource::ALL[rng.random_range(0..SentimentSource::ALL.len())];

                (score, source_kind)
            };

            self.db
                .news
                .add_sentiment(&NewSentiment {
                    asset_id: asset.id,
                    score,
                    source_kind,
                    analysis_date,
                })
                .await?;

            stored += 1;
        }

        Ok(stored)
    }

    async fn fetch_latest(&self) -> Result<marketfeed_sdk::models::NewsFeed> {
        let mut trials = 0;
        loop {
            match self
                .api_news
                .feed
                .get_latest(self.config.news_category(), self.config.news_language())
                .await
            {
                Ok(feed) => return Ok(feed),
                Err(error) => {
                    trials += 1;
                    if trials >= self.config.provider_error_max_trials().get() {
                        return Err(NewsFeedError::ProviderMaxTrialsReached {
                            error,
                            trials: self.config.provider_error_max_trials(),
                        });
                    }

                    time::sleep(self.config.provider_error_cooldown()).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
