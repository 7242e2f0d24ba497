use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::shared::rest::{base::RestBase, error::Result};

use super::{models::NewsFeed, path::NewsRestPath};

/// Methods for fetching the latest news articles.
///
/// This trait is sealed and not meant to be implemented outside of `marketfeed-sdk`.
#[async_trait]
pub trait NewsFeedRepository: crate::sealed::Sealed + Send + Sync {
    /// Fetches the latest articles, optionally filtered by category and language.
    ///
    /// Some provider plans reject filter combinations with a 422 response; in that case the
    /// request is retried once without the optional filters.
    async fn get_latest(&self, category: Option<&str>, language: Option<&str>)
    -> Result<NewsFeed>;
}

pub(super) struct HttpNewsFeedRepository {
    base: Arc<RestBase>,
}

impl HttpNewsFeedRepository {
    pub fn new(base: Arc<RestBase>) -> Self {
        Self { base }
    }
}

impl crate::sealed::Sealed for HttpNewsFeedRepository {}

#[async_trait]
impl NewsFeedRepository for HttpNewsFeedRepository {
    async fn get_latest(
        &self,
        category: Option<&str>,
        language: Option<&str>,
    ) -> Result<NewsFeed> {
        let mut query_params = Vec::new();

        if let Some(category) = category {
            query_params.push(("category", category.to_string()));
        }
        if let Some(language) = language {
            query_params.push(("language", language.to_string()));
        }

        let first_attempt = self.base.get(NewsRestPath::LatestNews, &query_params).await;

        match first_attempt {
            Err(e) if e.is_status(StatusCode::UNPROCESSABLE_ENTITY) && !query_params.is_empty() => {
                self.base.get(NewsRestPath::LatestNews, &[]).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests;
