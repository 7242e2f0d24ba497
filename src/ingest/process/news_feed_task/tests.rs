use chrono::Utc;

use crate::shared::TickerSymbol;

use super::*;

fn asset(ticker: &str, kind: AssetKind) -> AssetRow {
    AssetRow {
        id: Uuid::new_v4(),
        ticker: TickerSymbol::try_from(ticker).unwrap().to_string(),
        name: ticker.to_string(),
        kind,
        market_cap: None,
        created_at: Utc::now(),
    }
}

fn article(json: &str) -> NewsArticle {
    serde_json::from_str(json).expect("must deserialize article")
}

mod map_article {
    use super::*;

    #[test]
    fn attaches_by_leading_keyword() {
        let assets = [asset("AAPL", AssetKind::Stock), asset("BTC", AssetKind::Crypto)];

        let mapped = NewsFeedTask::map_article(
            &article(
                r#"{
                    "title": "Bitcoin climbs",
                    "link": "https://news.example.com/a",
                    "keywords": ["markets", "btc", "rally"],
                    "pubDate": "2026-08-01 10:00:00"
                }"#,
            ),
            &assets,
        )
        .expect("article maps");

        assert_eq!(mapped.asset_id, Some(assets[1].id));
        assert_eq!(mapped.title, "Bitcoin climbs");
    }

    #[test]
    fn only_the_leading_keywords_are_checked() {
        let assets = [asset("AAPL", AssetKind::Stock)];

        // The matching keyword sits beyond the checked prefix
        let mapped = NewsFeedTask::map_article(
            &article(
                r#"{
                    "title": "Tech roundup",
                    "link": "https://news.example.com/b",
                    "keywords": ["markets", "tech", "earnings", "aapl"]
                }"#,
            ),
            &assets,
        )
        .expect("article maps");

        assert_eq!(mapped.asset_id, None);
    }

    #[test]
    fn unmatched_articles_stay_unlinked() {
        let assets = [asset("AAPL", AssetKind::Stock)];

        let mapped = NewsFeedTask::map_article(
            &article(r#"{"title": "Macro outlook", "link": "https://news.example.com/c"}"#),
            &assets,
        )
        .expect("article maps");

        assert_eq!(mapped.asset_id, None);
    }

    #[test]
    fn drops_articles_without_title_or_link() {
        let assets = [asset("AAPL", AssetKind::Stock)];

        assert!(
            NewsFeedTask::map_article(&article(r#"{"link": "https://news.example.com/d"}"#), &assets)
                .is_none()
        );
        assert!(NewsFeedTask::map_article(&article(r#"{"title": "No link"}"#), &assets).is_none());
    }

    #[test]
    fn truncates_title_and_content() {
        let assets: [AssetRow; 0] = [];

        let long_title = "x".repeat(500);
        let long_body = "y".repeat(10_000);
        let mapped = NewsFeedTask::map_article(
            &article(&format!(
                r#"{{"title": "{long_title}", "content": "{long_body}", "link": "https://news.example.com/e"}}"#
            )),
            &assets,
        )
        .expect("article maps");

        assert_eq!(mapped.title.chars().count(), NewsFeedTask::TITLE_MAX_LEN);
        assert_eq!(mapped.content.chars().count(), NewsFeedTask::CONTENT_MAX_LEN);
    }

    #[test]
    fn missing_pub_date_defaults_to_now() {
        let before = Utc::now();

        let mapped = NewsFeedTask::map_article(
            &article(r#"{"title": "Undated", "link": "https://news.example.com/f"}"#),
            &[],
        )
        .expect("article maps");

        assert!(mapped.published_at >= before);
    }
}
