use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// A single article in the news feed.
///
/// Most fields are optional on the wire; the feed aggregates heterogeneous sources.
#[derive(Deserialize, Debug, Clone)]
pub struct NewsArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
    language: Option<String>,
}

impl NewsArticle {
    /// Article headline.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Article body, falling back to the description when the full content is absent.
    pub fn body(&self) -> Option<&str> {
        self.content
            .as_deref()
            .filter(|c| !c.is_empty())
            .or(self.description.as_deref())
    }

    /// Canonical source URL.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Keywords attached by the provider.
    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or(&[])
    }

    /// Article language code.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Publication time, parsed from the provider's `pubDate` string.
    ///
    /// The feed emits either RFC 3339 or a plain `YYYY-MM-DD HH:MM:SS` (UTC) format.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.pub_date.as_deref()?;

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Latest-news response envelope.
#[derive(Deserialize, Debug, Clone)]
pub struct NewsFeed {
    status: String,
    #[serde(rename = "totalResults")]
    total_results: Option<i64>,
    #[serde(default)]
    results: Vec<NewsArticle>,
}

impl NewsFeed {
    /// Provider status flag.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns `true` if the provider reported a successful fetch.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Total result count reported by the provider, across all pages.
    pub fn total_results(&self) -> Option<i64> {
        self.total_results
    }

    /// Articles in this page of the feed.
    pub fn results(&self) -> &[NewsArticle] {
        &self.results
    }

    /// Consumes the feed and returns its articles.
    pub fn into_results(self) -> Vec<NewsArticle> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn article_with_pub_date(pub_date: &str) -> NewsArticle {
        serde_json::from_str(&format!(r#"{{"pubDate": "{pub_date}"}}"#))
            .expect("must deserialize article")
    }

    #[test]
    fn published_at_parses_plain_format() {
        let article = article_with_pub_date("2026-08-01 14:30:00");
        assert_eq!(
            article.published_at(),
            Some(Utc.with_ymd_and_hms(2026, 8, 1, 14, 30, 0).unwrap())
        );
    }

    #[test]
    fn published_at_parses_rfc3339() {
        let article = article_with_pub_date("2026-08-01T14:30:00Z");
        assert_eq!(
            article.published_at(),
            Some(Utc.with_ymd_and_hms(2026, 8, 1, 14, 30, 0).unwrap())
        );
    }

    #[test]
    fn published_at_rejects_garbage() {
        let article = article_with_pub_date("yesterday-ish");
        assert_eq!(article.published_at(), None);
    }

    #[test]
    fn body_falls_back_to_description() {
        let article: NewsArticle = serde_json::from_str(
            r#"{"title": "t", "content": "", "description": "short summary"}"#,
        )
        .expect("must deserialize article");

        assert_eq!(article.body(), Some("short summary"));
    }
}
