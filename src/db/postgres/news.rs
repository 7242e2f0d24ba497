use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::super::{
    error::{DbError, Result},
    models::{NewArticle, NewSentiment, NewsArticleRow, SentimentRow},
    repositories::NewsRepository,
};

const ARTICLE_COLUMNS: &str = "id, asset_id, title, content, source, published_at, created_at";
const SENTIMENT_COLUMNS: &str = "id, asset_id, score, source_kind, analysis_date, created_at";

pub(crate) struct PgNewsRepo {
    pool: Arc<Pool<Postgres>>,
}

impl PgNewsRepo {
    pub fn new(pool: Arc<Pool<Postgres>>) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &Pool<Postgres> {
        self.pool.as_ref()
    }
}

#[async_trait]
impl NewsRepository for PgNewsRepo {
    async fn add_articles(&self, new_articles: &[NewArticle]) -> Result<Vec<NewsArticleRow>> {
        if new_articles.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await.map_err(DbError::TransactionBegin)?;

        let mut inserted = Vec::new();

        for article in new_articles {
            let row = sqlx::query_as::<_, NewsArticleRow>(&format!(
                r#"
                    INSERT INTO news_articles (asset_id, title, content, source, published_at)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (title, source) DO NOTHING
                    RETURNING {ARTICLE_COLUMNS}
                "#
            ))
            .bind(article.asset_id)
            .bind(&article.title)
            .bind(&article.content)
            .bind(&article.source)
            .bind(article.published_at)
            .fetch_optional(&mut *tx)
            .await
            .map_err(DbError::Query)?;

            if let Some(row) = row {
                inserted.push(row);
            }
        }

        tx.commit().await.map_err(DbError::TransactionCommit)?;

        Ok(inserted)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<NewsArticleRow>> {
        let rows = sqlx::query_as::<_, NewsArticleRow>(&format!(
            r#"
                SELECT {ARTICLE_COLUMNS}
                FROM news_articles
                ORDER BY published_at DESC
                LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }

    async fn list_for_asset(&self, asset_id: Uuid, limit: i64) -> Result<Vec<NewsArticleRow>> {
        let rows = sqlx::query_as::<_, NewsArticleRow>(&format!(
            r#"
                SELECT {ARTICLE_COLUMNS}
                FROM news_articles
                WHERE asset_id = $1
                ORDER BY published_at DESC
                LIMIT $2
            "#
        ))
        .bind(asset_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }

    async fn add_sentiment(&self, new_sentiment: &NewSentiment) -> Result<SentimentRow> {
        let row = sqlx::query_as::<_, SentimentRow>(&format!(
            r#"
                INSERT INTO sentiments (asset_id, score, source_kind, analysis_date)
                VALUES ($1, $2, $3, $4)
                RETURNING {SENTIMENT_COLUMNS}
            "#
        ))
        .bind(new_sentiment.asset_id)
        .bind(new_sentiment.score.as_f64())
        .bind(new_sentiment.source_kind)
        .bind(new_sentiment.analysis_date)
        .fetch_one(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }

    async fn list_recent_sentiments(&self, limit: i64) -> Result<Vec<SentimentRow>> {
        let rows = sqlx::query_as::<_, SentimentRow>(&format!(
            r#"
                SELECT {SENTIMENT_COLUMNS}
                FROM sentiments
                ORDER BY analysis_date DESC
                LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }

    async fn latest_sentiment_for_asset(&self, asset_id: Uuid) -> Result<Option<SentimentRow>> {
        let row = sqlx::query_as::<_, SentimentRow>(&format!(
            r#"
                SELECT {SENTIMENT_COLUMNS}
                FROM sentiments
                WHERE asset_id = $1
                ORDER BY analysis_date DESC
                LIMIT 1
            "#
        ))
        .bind(asset_id)
        .fetch_optional(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }
}
