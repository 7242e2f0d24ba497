use std::{env, sync::Arc};

use marketfeed_sdk::{RestClientConfig, crypto, news, stocks};

use marketscope::{
    Database,
    error::Result,
    ingest::{IngestConfig, IngestEngine, IngestMode, ProviderSet},
    models::{AssetKind, NewAsset, TickerSymbol},
    predict::RandomWalkPredictor,
    tui::{DashboardTui, DashboardTuiConfig, TuiStatusStopped},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let stocks_api_url = env::var("STOCKS_API_URL").expect("STOCKS_API_URL must be set");
    let stocks_api_key = env::var("STOCKS_API_KEY").expect("STOCKS_API_KEY must be set");
    let crypto_api_url = env::var("CRYPTO_API_URL").expect("CRYPTO_API_URL must be set");
    let crypto_api_key = env::var("CRYPTO_API_KEY").expect("CRYPTO_API_KEY must be set");
    let news_api_url = env::var("NEWS_API_URL").expect("NEWS_API_URL must be set");
    let news_api_key = env::var("NEWS_API_KEY").expect("NEWS_API_KEY must be set");
    let watchlist = env::var("WATCHLIST").unwrap_or_default();
    let log_file_path = env::var("DASHBOARD_LOG_FILE").ok();

    let db = Database::new(&db_url).await?;

    seed_watchlist(&db, &watchlist).await?;

    let config = IngestConfig::default();
    let rest_config = RestClientConfig::from(&config);

    let providers = ProviderSet {
        stocks: stocks::RestClient::new(rest_config.clone(), stocks_api_url, stocks_api_key)?,
        crypto: crypto::RestClient::new(rest_config.clone(), crypto_api_url, crypto_api_key)?,
        news: news::RestClient::new(rest_config, news_api_url, news_api_key)?,
    };

    let engine = IngestEngine::new(
        config,
        db,
        providers,
        Arc::new(RandomWalkPredictor::new()),
        IngestMode::Continuous,
    );

    let tui = DashboardTui::launch(DashboardTuiConfig::default(), log_file_path.as_deref()).await?;

    tui.couple(engine)?;

    let stopped = tui.until_stopped().await;

    if let TuiStatusStopped::Crashed(e) = stopped.as_ref() {
        eprintln!("Dashboard stopped with an error: {e}");
    }

    Ok(())
}

/// Seeds the asset catalog from the `WATCHLIST` env var.
///
/// Format: comma-separated `TICKER:Name:KIND` entries, e.g.
/// `AAPL:Apple Inc.:STOCK,BTC:Bitcoin:CRYPTO`. Existing catalog entries are left untouched.
async fn seed_watchlist(db: &Database, watchlist: &str) -> Result<()> {
    for item in watchlist.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let mut parts = item.splitn(3, ':');

        let ticker = parts.next().unwrap_or_default();
        let name = parts.next().unwrap_or(ticker).trim();
        let kind = parts.next().unwrap_or("STOCK").trim();

        let ticker = TickerSymbol::try_from(ticker)?;
        let kind: AssetKind = kind.to_uppercase().parse()?;

        db.assets
            .ensure_asset(&NewAsset {
                ticker,
                name: name.to_string(),
                kind,
                market_cap: None,
            })
            .await?;
    }

    Ok(())
}
