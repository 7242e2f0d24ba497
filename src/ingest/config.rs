use std::num::NonZeroU64;

use tokio::time;

use marketfeed_sdk::RestClientConfig;

/// Configuration for the ingestion engine.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    provider_timeout: time::Duration,
    provider_cooldown: time::Duration,
    provider_error_cooldown: time::Duration,
    provider_error_max_trials: NonZeroU64,
    quote_convert: String,
    news_category: Option<String>,
    news_language: Option<String>,
    news_article_limit: usize,
    stock_backfill_days: u32,
    stats_lookback: NonZeroU64,
    cycle_interval: time::Duration,
    restart_interval: time::Duration,
    shutdown_timeout: time::Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            provider_timeout: RestClientConfig::default().timeout(),
            provider_cooldown: time::Duration::from_secs(1),
            provider_error_cooldown: time::Duration::from_secs(10),
            provider_error_max_trials: 3.try_into().expect("not zero"),
            quote_convert: "USD".to_string(),
            news_category: Some("business".to_string()),
            news_language: Some("en".to_string()),
            news_article_limit: 30,
            stock_backfill_days: 365,
            stats_lookback: (crate::stats::AssetStatsEvaluator::FULL_WINDOW as u64)
                .try_into()
                .expect("not zero"),
            cycle_interval: time::Duration::from_secs(15 * 60),
            restart_interval: time::Duration::from_secs(10),
            shutdown_timeout: time::Duration::from_secs(6),
        }
    }
}

impl IngestConfig {
    /// Returns the timeout for provider REST API requests.
    pub fn provider_timeout(&self) -> time::Duration {
        self.provider_timeout
    }

    /// Returns the pause between successive per-asset provider calls.
    pub fn provider_cooldown(&self) -> time::Duration {
        self.provider_cooldown
    }

    /// Returns the cooldown period after provider errors before retrying.
    pub fn provider_error_cooldown(&self) -> time::Duration {
        self.provider_error_cooldown
    }

    /// Returns the maximum number of retry attempts for provider errors.
    pub fn provider_error_max_trials(&self) -> NonZeroU64 {
        self.provider_error_max_trials
    }

    /// Returns the fiat conversion currency for quotes.
    pub fn quote_convert(&self) -> &str {
        &self.quote_convert
    }

    /// Returns the news category filter.
    pub fn news_category(&self) -> Option<&str> {
        self.news_category.as_deref()
    }

    /// Returns the news language filter.
    pub fn news_language(&self) -> Option<&str> {
        self.news_language.as_deref()
    }

    /// Returns the maximum number of articles stored per cycle.
    pub fn news_article_limit(&self) -> usize {
        self.news_article_limit
    }

    /// Returns how many days of daily candles to backfill for a stock with no history.
    pub fn stock_backfill_days(&self) -> u32 {
        self.stock_backfill_days
    }

    /// Returns the number of trailing closes fed to the stats evaluators.
    pub fn stats_lookback(&self) -> NonZeroU64 {
        self.stats_lookback
    }

    /// Returns the pause between ingestion cycles.
    pub fn cycle_interval(&self) -> time::Duration {
        self.cycle_interval
    }

    /// Returns the interval for restarting the ingestion process after a recoverable error.
    pub fn restart_interval(&self) -> time::Duration {
        self.restart_interval
    }

    /// Returns the timeout duration for graceful shutdown operations.
    pub fn shutdown_timeout(&self) -> time::Duration {
        self.shutdown_timeout
    }

    /// Sets the timeout for provider REST API requests.
    ///
    /// Default: [`RestClientConfig`](marketfeed_sdk::RestClientConfig) default
    pub fn with_provider_timeout(mut self, secs: u64) -> Self {
        self.provider_timeout = time::Duration::from_secs(secs);
        self
    }

    /// Sets the pause between successive per-asset provider calls.
    ///
    /// Default: `1` second
    pub fn with_provider_cooldown(mut self, millis: u64) -> Self {
        self.provider_cooldown = time::Duration::from_millis(millis);
        self
    }

    /// Sets the cooldown period after provider errors before retrying.
    ///
    /// Default: `10` seconds
    pub fn with_provider_error_cooldown(mut self, secs: u64) -> Self {
        self.provider_error_cooldown = time::Duration::from_secs(secs);
        self
    }

    /// Sets the maximum number of retry attempts for provider errors.
    ///
    /// Default: `3`
    pub fn with_provider_error_max_trials(mut self, max_trials: NonZeroU64) -> Self {
        self.provider_error_max_trials = max_trials;
        self
    }

    /// Sets the fiat conversion currency for quotes.
    ///
    /// Default: `USD`
    pub fn with_quote_convert(mut self, convert: impl ToString) -> Self {
        self.quote_convert = convert.to_string().to_uppercase();
        self
    }

    /// Sets the news category filter. `None` fetches across categories.
    ///
    /// Default: `business`
    pub fn with_news_category(mut self, category: Option<String>) -> Self {
        self.news_category = category;
        self
    }

    /// Sets the news language filter. `None` fetches across languages.
    ///
    /// Default: `en`
    pub fn with_news_language(mut self, language: Option<String>) -> Self {
        self.news_language = language;
        self
    }

    /// Sets the maximum number of articles stored per cycle.
    ///
    /// Default: `30`
    pub fn with_news_article_limit(mut self, limit: usize) -> Self {
        self.news_article_limit = limit;
        self
    }

    /// Sets how many days of daily candles to backfill for a stock with no history.
    ///
    /// Default: `365`
    pub fn with_stock_backfill_days(mut self, days: u32) -> Self {
        self.stock_backfill_days = days;
        self
    }

    /// Sets the number of trailing closes fed to the stats evaluators.
    ///
    /// Default: [`AssetStatsEvaluator::FULL_WINDOW`](crate::stats::AssetStatsEvaluator::FULL_WINDOW)
    pub fn with_stats_lookback(mut self, lookback: NonZeroU64) -> Self {
        self.stats_lookback = lookback;
        self
    }

    /// Sets the pause between ingestion cycles.
    ///
    /// Default: `900` seconds (15 minutes)
    pub fn with_cycle_interval(mut self, secs: u64) -> Self {
        self.cycle_interval = time::Duration::from_secs(secs);
        self
    }

    /// Sets the interval for restarting the ingestion process after a recoverable error.
    ///
    /// Default: `10` seconds
    pub fn with_restart_interval(mut self, secs: u64) -> Self {
        self.restart_interval = time::Duration::from_secs(secs);
        self
    }

    /// Sets the timeout duration for graceful shutdown operations.
    ///
    /// Default: `6` seconds
    pub fn with_shutdown_timeout(mut self, secs: u64) -> Self {
        self.shutdown_timeout = time::Duration::from_secs(secs);
        self
    }
}

impl From<&IngestConfig> for RestClientConfig {
    fn from(value: &IngestConfig) -> Self {
        RestClientConfig::default().with_timeout(value.provider_timeout())
    }
}

#[derive(Debug)]
pub(crate) struct IngestControllerConfig {
    shutdown_timeout: time::Duration,
}

impl IngestControllerConfig {
    pub fn shutdown_timeout(&self) -> time::Duration {
        self.shutdown_timeout
    }
}

impl From<&IngestConfig> for IngestControllerConfig {
    fn from(value: &IngestConfig) -> Self {
        Self {
            shutdown_timeout: value.shutdown_timeout,
        }
    }
}

#[derive(Clone)]
pub(crate) struct IngestProcessConfig {
    provider_cooldown: time::Duration,
    provider_error_cooldown: time::Duration,
    provider_error_max_trials: NonZeroU64,
    quote_convert: String,
    news_category: Option<String>,
    news_language: Option<String>,
    news_article_limit: usize,
    stock_backfill_days: u32,
    stats_lookback: NonZeroU64,
    cycle_interval: time::Duration,
    restart_interval: time::Duration,
}

impl IngestProcessConfig {
    pub fn cycle_interval(&self) -> time::Duration {
        self.cycle_interval
    }

    pub fn restart_interval(&self) -> time::Duration {
        self.restart_interval
    }
}

impl From<&IngestConfig> for IngestProcessConfig {
    fn from(value: &IngestConfig) -> Self {
        Self {
            provider_cooldown: value.provider_cooldown,
            provider_error_cooldown: value.provider_error_cooldown,
            provider_error_max_trials: value.provider_error_max_trials,
            quote_convert: value.quote_convert.clone(),
            news_category: value.news_category.clone(),
            news_language: value.news_language.clone(),
            news_article_limit: value.news_article_limit,
            stock_backfill_days: value.stock_backfill_days,
            stats_lookback: value.stats_lookback,
            cycle_interval: value.cycle_interval,
            restart_interval: value.restart_interval,
        }
    }
}

#[derive(Clone)]
pub(crate) struct MarketDataTaskConfig {
    provider_cooldown: time::Duration,
    provider_error_cooldown: time::Duration,
    provider_error_max_trials: NonZeroU64,
    quote_convert: String,
    stock_backfill_days: u32,
}

impl MarketDataTaskConfig {
    pub fn provider_cooldown(&self) -> time::Duration {
        self.provider_cooldown
    }

    pub fn provider_error_cooldown(&self) -> time::Duration {
        self.provider_error_cooldown
    }

    pub fn provider_error_max_trials(&self) -> NonZeroU64 {
        self.provider_error_max_trials
    }

    pub fn quote_convert(&self) -> &str {
        &self.quote_convert
    }

    pub fn stock_backfill_days(&self) -> u32 {
        self.stock_backfill_days
    }
}

impl From<&IngestProcessConfig> for MarketDataTaskConfig {
    fn from(value: &IngestProcessConfig) -> Self {
        Self {
            provider_cooldown: value.provider_cooldown,
            provider_error_cooldown: value.provider_error_cooldown,
            provider_error_max_trials: value.provider_error_max_trials,
            quote_convert: value.quote_convert.clone(),
            stock_backfill_days: value.stock_backfill_days,
        }
    }
}

#[derive(Clone)]
pub(crate) struct NewsFeedTaskConfig {
    provider_error_cooldown: time::Duration,
    provider_error_max_trials: NonZeroU64,
    news_category: Option<String>,
    news_language: Option<String>,
    news_article_limit: usize,
}

impl NewsFeedTaskConfig {
    pub fn provider_error_cooldown(&self) -> time::Duration {
        self.provider_error_cooldown
    }

    pub fn provider_error_max_trials(&self) -> NonZeroU64 {
        self.provider_error_max_trials
    }

    pub fn news_category(&self) -> Option<&str> {
        self.news_category.as_deref()
    }

    pub fn news_language(&self) -> Option<&str> {
        self.news_language.as_deref()
    }

    pub fn news_article_limit(&self) -> usize {
        self.news_article_limit
    }
}

impl From<&IngestProcessConfig> for NewsFeedTaskConfig {
    fn from(value: &IngestProcessConfig) -> Self {
        Self {
            provider_error_cooldown: value.provider_error_cooldown,
            provider_error_max_trials: value.provider_error_max_trials,
            news_category: value.news_category.clone(),
            news_language: value.news_language.clone(),
            news_article_limit: value.news_article_limit,
        }
    }
}

#[derive(Clone)]
pub(crate) struct AnalyticsTaskConfig {
    stats_lookback: NonZeroU64,
}

impl AnalyticsTaskConfig {
    pub fn stats_lookback(&self) -> NonZeroU64 {
        self.stats_lookback
    }
}

impl From<&IngestProcessConfig> for AnalyticsTaskConfig {
    fn from(value: &IngestProcessConfig) -> Self {
        Self {
            stats_lookback: value.stats_lookback,
        }
    }
}
