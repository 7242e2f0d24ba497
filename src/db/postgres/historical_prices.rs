use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::util::DateTimeExt;

use super::super::{
    error::{DbError, Result},
    models::{HistoricalPriceRow, NewHistoricalPrice},
    repositories::PricesRepository,
};

const PRICE_COLUMNS: &str = "id, asset_id, time, open, high, low, close, volume, created_at";

pub(crate) struct PgPricesRepo {
    pool: Arc<Pool<Postgres>>,
}

impl PgPricesRepo {
    pub fn new(pool: Arc<Pool<Postgres>>) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &Pool<Postgres> {
        self.pool.as_ref()
    }
}

#[async_trait]
impl PricesRepository for PgPricesRepo {
    async fn add_prices(&self, asset_id: Uuid, new_prices: &[NewHistoricalPrice]) -> Result<()> {
        if new_prices.is_empty() {
            return Ok(());
        }

        // Reject inconsistent entries before anything is written. Times must sit on the
        // (asset_id, time) day grid, or upserts would silently duplicate a day.
        for price in new_prices {
            if !price.time.is_round_day() {
                return Err(DbError::PriceTimeNotDayAligned { time: price.time });
            }
            if !price.is_ohlc_consistent() {
                return Err(DbError::InvalidOhlcRange { time: price.time });
            }
        }

        let mut times = Vec::with_capacity(new_prices.len());
        let mut opens = Vec::with_capacity(new_prices.len());
        let mut highs = Vec::with_capacity(new_prices.len());
        let mut lows = Vec::with_capacity(new_prices.len());
        let mut closes = Vec::with_capacity(new_prices.len());
        let mut volumes = Vec::with_capacity(new_prices.len());

        for price in new_prices {
            times.push(price.time);
            opens.push(price.open);
            highs.push(price.high);
            lows.push(price.low);
            closes.push(price.close);
            volumes.push(price.volume);
        }

        // Batch upsert, refreshing provisional rows for a re-ingested period
        sqlx::query(
            r#"
                INSERT INTO historical_prices (asset_id, time, open, high, low, close, volume)
                SELECT $1, * FROM unnest($2::timestamptz[], $3::float8[], $4::float8[], $5::float8[], $6::float8[], $7::bigint[])
                ON CONFLICT (asset_id, time) DO UPDATE
                SET open = EXCLUDED.open,
                    high = EXCLUDED.high,
                    low = EXCLUDED.low,
                    close = EXCLUDED.close,
                    volume = EXCLUDED.volume
            "#,
        )
        .bind(asset_id)
        .bind(times)
        .bind(opens)
        .bind(highs)
        .bind(lows)
        .bind(closes)
        .bind(volumes)
        .execute(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(())
    }

    async fn get_latest(&self, asset_id: Uuid) -> Result<Option<HistoricalPriceRow>> {
        let row = sqlx::query_as::<_, HistoricalPriceRow>(&format!(
            r#"
                SELECT {PRICE_COLUMNS}
                FROM historical_prices
                WHERE asset_id = $1
                ORDER BY time DESC
                LIMIT 1
            "#
        ))
        .bind(asset_id)
        .fetch_optional(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }

    async fn get_range_from(
        &self,
        asset_id: Uuid,
        from: DateTime<Utc>,
    ) -> Result<Vec<HistoricalPriceRow>> {
        let rows = sqlx::query_as::<_, HistoricalPriceRow>(&format!(
            r#"
                SELECT {PRICE_COLUMNS}
                FROM historical_prices
                WHERE asset_id = $1 AND time >= $2
                ORDER BY time ASC
            "#
        ))
        .bind(asset_id)
        .bind(from)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }

    async fn get_closes(&self, asset_id: Uuid, limit: i64) -> Result<Vec<f64>> {
        let closes = sqlx::query_scalar::<_, f64>(
            r#"
                SELECT close FROM (
                    SELECT close, time
                    FROM historical_prices
                    WHERE asset_id = $1
                    ORDER BY time DESC
                    LIMIT $2
                ) AS recent
                ORDER BY time ASC
            "#,
        )
        .bind(asset_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(closes)
    }

    async fn count_for_asset(&self, asset_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM historical_prices WHERE asset_id = $1",
        )
        .bind(asset_id)
        .fetch_one(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(count)
    }
}
