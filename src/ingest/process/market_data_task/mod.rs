use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::time;

use marketfeed_sdk::{
    crypto,
    models::{CandleResolution, CryptoQuote, CryptoQuotesResponse, StockQuote},
    stocks,
};

use crate::{
    db::{
        Database,
        models::{AssetRow, NewHistoricalPrice},
    },
    shared::AssetKind,
    util::DateTimeExt,
};

use super::super::config::{IngestProcessConfig, MarketDataTaskConfig};

pub(crate) mod error;

use error::{MarketDataError, Result};

/// Outcome counters of one market-data pass over the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MarketDataReport {
    pub prices_stored: usize,
    pub assets_skipped: usize,
    pub backfilled_assets: usize,
}

pub(super) struct MarketDataTask {
    config: MarketDataTaskConfig,
    db: Arc<Database>,
    api_stocks: Arc<stocks::RestClient>,
    api_crypto: Arc<crypto::RestClient>,
}

impl MarketDataTask {
    pub fn new(
        config: &IngestProcessConfig,
        db: Arc<Database>,
        api_stocks: Arc<stocks::RestClient>,
        api_crypto: Arc<crypto::RestClient>,
    ) -> Self {
        Self {
            config: config.into(),
            db,
            api_stocks,
            api_crypto,
        }
    }

    pub async fn run(self, assets: &[AssetRow]) -> Result<MarketDataReport> {
        let mut report = MarketDataReport::default();

        let cryptos: Vec<&AssetRow> = assets
            .iter()
            .filter(|a| a.kind == AssetKind::Crypto)
            .collect();
        let stocks: Vec<&AssetRow> = assets
            .iter()
            .filter(|a| a.kind == AssetKind::Stock)
            .collect();

        if !cryptos.is_empty() {
            self.ingest_cryptos(&cryptos, &mut report).await?;
        }

        for asset in stocks {
            self.ingest_stock(asset, &mut report).await?;
        }

        Ok(report)
    }

    async fn ingest_cryptos(
        &self,
        cryptos: &[&AssetRow],
        report: &mut MarketDataReport,
    ) -> Result<()> {
        let symbols: Vec<String> = cryptos.iter().map(|a| a.ticker.clone()).collect();

        let response = self.fetch_crypto_quotes(&symbols).await?;
        let quotes = response.quotes_in(self.config.quote_convert());

        let day_bucket = Utc::now().floor_day();

        for asset in cryptos {
            let Some(quote) = quotes.get(&asset.ticker) else {
                report.assets_skipped += 1;
                continue;
            };
            let Some(price) = quote.price() else {
                report.assets_skipped += 1;
                continue;
            };

            let entry = Self::crypto_day_entry(day_bucket, price, quote);
            self.db.prices.add_prices(asset.id, &[entry]).await?;
            report.prices_stored += 1;

            if let Some(market_cap) = quote.market_cap() {
                self.db
                    .assets
                    .update_market_cap(asset.id, Some(market_cap))
                    .await?;
            }
        }

        Ok(())
    }

    /// Builds the running day-bucket entry for a crypto asset.
    ///
    /// The quote provider reports only the current price and the 24h change, so the open is
    /// derived from the change and the high/low collapse onto the open/close envelope.
    fn crypto_day_entry(
        day_bucket: DateTime<Utc>,
        price: f64,
        quote: &CryptoQuote,
    ) -> NewHistoricalPrice {
        let open = quote
            .percent_change_24h()
            .map(|pct| price / (1. + pct / 100.))
            .filter(|open| open.is_finite() && *open > 0.)
            .unwrap_or(price);

        let volume = quote
            .volume_24h()
            .filter(|v| v.is_finite() && *v >= 0.)
            .map(|v| v as i64)
            .unwrap_or(0);

        NewHistoricalPrice {
            time: day_bucket,
            open,
            high: price.max(open),
            low: price.min(open),
            close: price,
            volume,
        }
    }

    async fn ingest_stock(&self, asset: &AssetRow, report: &mut MarketDataReport) -> Result<()> {
        let quote = self.fetch_stock_quote(&asset.ticker).await?;

        if quote.is_empty() {
            report.assets_skipped += 1;
            return Ok(());
        }

        if self.db.prices.count_for_asset(asset.id).await? == 0
            && self.backfill_stock(asset).await?
        {
            report.backfilled_assets += 1;
        }

        let entry = Self::stock_day_entry(&quote);
        self.db.prices.add_prices(asset.id, &[entry]).await?;
        report.prices_stored += 1;

        Ok(())
    }

    /// Builds the running day-bucket entry for a stock from its session quote.
    fn stock_day_entry(quote: &StockQuote) -> NewHistoricalPrice {
        let open = quote.open();
        let close = quote.current();

        // Clamp the envelope so a stale provider quote can't violate OHLC bounds
        let high = quote.high().max(open).max(close);
        let low = quote.low().min(open).min(close);

        NewHistoricalPrice {
            time: Utc::now().floor_day(),
            open,
            high,
            low,
            close,
            volume: 0,
        }
    }

    /// Backfills daily candles for a stock that has no stored history yet.
    ///
    /// Some provider plans reject the candle endpoint with a 403; the asset then starts
    /// accumulating history from live quotes instead.
    async fn backfill_stock(&self, asset: &AssetRow) -> Result<bool> {
        let to = Utc::now();
        let from = to - Duration::days(self.config.stock_backfill_days() as i64);

        time::sleep(self.config.provider_cooldown()).await;

        let series = match self
            .api_stocks
            .quotes
            .get_candles(&asset.ticker, CandleResolution::OneDay, from, to)
            .await
        {
            Ok(series) => series,
            Err(e) if e.is_status_code(403) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        if !series.is_ok() {
            // "no_data" for the requested range
            return Ok(false);
        }

        let candles = series.try_into_candles()?;

        let entries: Vec<NewHistoricalPrice> = candles
            .into_iter()
            .map(|candle| NewHistoricalPrice {
                time: candle.time.floor_day(),
                open: candle.open,
                high: candle.high.max(candle.open).max(candle.close),
                low: candle.low.min(candle.open).min(candle.close),
                close: candle.close,
                volume: candle.volume,
            })
            .collect();

        if entries.is_empty() {
            return Ok(false);
        }

        self.db.prices.add_prices(asset.id, &entries).await?;

        Ok(true)
    }

    async fn fetch_stock_quote(&self, symbol: &str) -> Result<StockQuote> {
        let mut trials = 0;
        loop {
            time::sleep(self.config.provider_cooldown()).await;

            match self.api_stocks.quotes.get_quote(symbol).await {
                Ok(quote) => return Ok(quote),
                Err(error) => {
                    trials += 1;
                    if trials >= self.config.provider_error_max_trials().get() {
                        return Err(MarketDataError::ProviderMaxTrialsReached {
                            error,
                            trials: self.config.provider_error_max_trials(),
                        });
                    }

                    time::sleep(self.config.provider_error_cooldown()).await;
                }
            }
        }
    }

    async fn fetch_crypto_quotes(&self, symbols: &[String]) -> Result<CryptoQuotesResponse> {
        let mut trials = 0;
        loop {
            time::sleep(self.config.provider_cooldown()).await;

            match self
                .api_crypto
                .quotes
                .get_quotes(symbols, self.config.quote_convert())
                .await
            {
                Ok(response) => return Ok(response),
                Err(error) => {
                    trials += 1;
                    if trials >= self.config.provider_error_max_trials().get() {
                        return Err(MarketDataError::ProviderMaxTrialsReached {
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
