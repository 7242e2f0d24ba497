//! Round-trip tests against a live PostgreSQL instance.
//!
//! Run with `cargo test -- --ignored` after exporting `DATABASE_URL`.

use std::{env, sync::Arc};

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    predict::{PredictionOutcome, Predictor, RandomWalkPredictor},
    shared::{AssetKind, ConfidenceScore, PredictionHorizon, SentimentScore, SentimentSource, SubscriptionPlan, TickerSymbol},
    stats::AssetStatsValues,
};

use super::{models::*, *};

async fn init_db_from_env() -> Arc<Database> {
    dotenvy::dotenv().ok();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL environment variable must be set");

    Database::new(&db_url).await.expect("must create `Database`")
}

fn unique_ticker() -> TickerSymbol {
    let suffix = Uuid::new_v4().simple().to_string();
    TickerSymbol::try_from(format!("T{}", &suffix[..6])).expect("generated ticker is valid")
}

fn new_asset(kind: AssetKind) -> NewAsset {
    NewAsset {
        ticker: unique_ticker(),
        name: "Test Asset".to_string(),
        kind,
        market_cap: None,
    }
}

fn day(offset: i64) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::days(offset)
}

fn price_at(offset: i64, close: f64) -> NewHistoricalPrice {
    NewHistoricalPrice {
        time: day(offset),
        open: close - 1.,
        high: close + 2.,
        low: close - 2.,
        close,
        volume: 1_000,
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn ensure_asset_is_idempotent() {
    let db = init_db_from_env().await;

    let payload = new_asset(AssetKind::Stock);
    let first = db.assets.ensure_asset(&payload).await.unwrap();
    let second = db.assets.ensure_asset(&payload).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.kind, AssetKind::Stock);

    db.assets.remove_asset(first.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn add_prices_rejects_inconsistent_ohlc() {
    let db = init_db_from_env().await;

    let asset = db.assets.ensure_asset(&new_asset(AssetKind::Stock)).await.unwrap();

    let bad = NewHistoricalPrice {
        time: day(0),
        open: 10.,
        high: 9.,
        low: 8.,
        close: 10.,
        volume: 1,
    };

    let res = db.prices.add_prices(asset.id, &[bad]).await;
    assert!(matches!(res, Err(DbError::InvalidOhlcRange { .. })));

    // Intraday times are rejected too
    let misaligned = NewHistoricalPrice {
        time: day(0) + Duration::hours(9),
        ..price_at(0, 100.)
    };
    let res = db.prices.add_prices(asset.id, &[misaligned]).await;
    assert!(matches!(res, Err(DbError::PriceTimeNotDayAligned { .. })));

    // Nothing was written
    assert_eq!(db.prices.count_for_asset(asset.id).await.unwrap(), 0);

    db.assets.remove_asset(asset.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn add_prices_upserts_on_the_day_key() {
    let db = init_db_from_env().await;

    let asset = db.assets.ensure_asset(&new_asset(AssetKind::Stock)).await.unwrap();

    db.prices
        .add_prices(asset.id, &[price_at(0, 100.), price_at(1, 101.)])
        .await
        .unwrap();

    // Re-ingesting day 1 refreshes it instead of duplicating
    db.prices.add_prices(asset.id, &[price_at(1, 150.)]).await.unwrap();

    assert_eq!(db.prices.count_for_asset(asset.id).await.unwrap(), 2);

    let latest = db.prices.get_latest(asset.id).await.unwrap().unwrap();
    assert_eq!(latest.close, 150.);

    let closes = db.prices.get_closes(asset.id, 10).await.unwrap();
    assert_eq!(closes, vec![100., 150.]);

    db.assets.remove_asset(asset.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn prediction_upsert_is_idempotent_per_day() {
    let db = init_db_from_env().await;

    let asset = db.assets.ensure_asset(&new_asset(AssetKind::Stock)).await.unwrap();

    let outcome = PredictionOutcome {
        horizon: PredictionHorizon::OneDay,
        prediction_date: day(1) + Duration::hours(9),
        predicted_price: 105.,
        confidence: ConfidenceScore::try_from(0.8).unwrap(),
        model_version: "v1.0-random".to_string(),
    };

    let first = db.predictions.upsert_prediction(asset.id, &outcome).await.unwrap();

    // Same asset, horizon and day, different time of day: updates in place
    let overlapping = PredictionOutcome {
        prediction_date: day(1) + Duration::hours(17),
        predicted_price: 110.,
        ..outcome
    };
    let second = db
        .predictions
        .upsert_prediction(asset.id, &overlapping)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.predicted_price, 110.);

    let latest = db
        .predictions
        .latest_for_asset(asset.id, &PredictionHorizon::ALL)
        .await
        .unwrap();
    assert_eq!(latest.len(), 1);

    db.assets.remove_asset(asset.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn favorites_pair_is_unique_and_toggles() {
    let db = init_db_from_env().await;

    let asset = db.assets.ensure_asset(&new_asset(AssetKind::Crypto)).await.unwrap();
    let profile = db.profiles.ensure_profile(Uuid::new_v4()).await.unwrap();

    assert!(db.profiles.toggle_favorite(profile.id, asset.id).await.unwrap());
    assert_eq!(db.profiles.list_favorites(profile.id).await.unwrap().len(), 1);

    // Toggling again removes the favorite instead of duplicating the pair
    assert!(!db.profiles.toggle_favorite(profile.id, asset.id).await.unwrap());
    assert!(db.profiles.list_favorites(profile.id).await.unwrap().is_empty());

    db.assets.remove_asset(asset.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn one_profile_per_user() {
    let db = init_db_from_env().await;

    let user_id = Uuid::new_v4();
    let first = db.profiles.ensure_profile(user_id).await.unwrap();
    let second = db.profiles.ensure_profile(user_id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.plan, SubscriptionPlan::Free);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn plan_gates_visible_horizons() {
    let db = init_db_from_env().await;

    let asset = db.assets.ensure_asset(&new_asset(AssetKind::Stock)).await.unwrap();
    let predictor = RandomWalkPredictor::new();

    for horizon in PredictionHorizon::ALL {
        let outcome = predictor.predict(100., horizon, Utc::now()).unwrap();
        db.predictions.upsert_prediction(asset.id, &outcome).await.unwrap();
    }

    let user_id = Uuid::new_v4();
    db.profiles.ensure_profile(user_id).await.unwrap();

    let visible = db
        .predictions_for_user(user_id, &asset.ticker)
        .await
        .unwrap();
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|p| p.horizon != PredictionHorizon::ThirtyDays));

    db.profiles.set_plan(user_id, SubscriptionPlan::Premium).await.unwrap();
    let visible = db
        .predictions_for_user(user_id, &asset.ticker)
        .await
        .unwrap();
    assert_eq!(visible.len(), 3);

    // The view log is append-only
    let viewed = &visible[0];
    db.predictions.record_view(user_id, viewed.id).await.unwrap();
    db.predictions.record_view(user_id, viewed.id).await.unwrap();
    assert_eq!(db.predictions.recent_views(user_id, 10).await.unwrap().len(), 2);

    db.assets.remove_asset(asset.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn removing_an_asset_cascades() {
    let db = init_db_from_env().await;

    let asset = db.assets.ensure_asset(&new_asset(AssetKind::Crypto)).await.unwrap();

    db.prices.add_prices(asset.id, &[price_at(0, 100.)]).await.unwrap();
    db.stats
        .upsert_stats(asset.id, &AssetStatsValues::default())
        .await
        .unwrap();
    db.news
        .add_sentiment(&NewSentiment {
            asset_id: asset.id,
            score: SentimentScore::try_from(0.6).unwrap(),
            source_kind: SentimentSource::Reddit,
            analysis_date: Utc::now(),
        })
        .await
        .unwrap();

    let outcome = RandomWalkPredictor::new()
        .predict(100., PredictionHorizon::OneDay, Utc::now())
        .unwrap();
    db.predictions.upsert_prediction(asset.id, &outcome).await.unwrap();

    db.assets.remove_asset(asset.id).await.unwrap();

    assert_eq!(db.prices.count_for_asset(asset.id).await.unwrap(), 0);
    assert!(db.stats.get_for_asset(asset.id).await.unwrap().is_none());
    assert!(db.news.latest_sentiment_for_asset(asset.id).await.unwrap().is_none());
    assert!(
        db.predictions
            .latest_for_asset(asset.id, &PredictionHorizon::ALL)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn contact_messages_round_trip() {
    let db = init_db_from_env().await;

    let marker = Uuid::new_v4().simple().to_string();
    let stored = db
        .contact_messages
        .add_message(&NewContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            topic: format!("Feedback {marker}"),
            message: "The dashboard is great.".to_string(),
        })
        .await
        .unwrap();

    let recent = db.contact_messages.list_recent(10).await.unwrap();
    assert!(recent.iter().any(|m| m.id == stored.id));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn article_dedup_and_overview() {
    let db = init_db_from_env().await;

    let asset = db.assets.ensure_asset(&new_asset(AssetKind::Crypto)).await.unwrap();

    let marker = Uuid::new_v4().simple().to_string();
    let article = NewArticle {
        asset_id: Some(asset.id),
        title: format!("Headline {marker}"),
        content: "Body".to_string(),
        source: format!("https://news.example.com/{marker}"),
        published_at: Utc::now(),
    };

    let inserted = db.news.add_articles(&[article.clone()]).await.unwrap();
    assert_eq!(inserted.len(), 1);

    // Same (title, source) pair is ignored on re-ingestion
    let inserted = db.news.add_articles(&[article]).await.unwrap();
    assert!(inserted.is_empty());

    let overview = db.asset_overview(&asset.ticker).await.unwrap();
    assert_eq!(overview.asset.id, asset.id);
    assert_eq!(overview.recent_news.len(), 1);

    db.assets.remove_asset(asset.id).await.unwrap();
}
