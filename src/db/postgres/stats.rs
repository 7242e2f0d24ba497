use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::stats::AssetStatsValues;

use super::super::{
    error::{DbError, Result},
    models::AssetStatsRow,
    repositories::StatsRepository,
};

pub(crate) struct PgStatsRepo {
    pool: Arc<Pool<Postgres>>,
}

impl PgStatsRepo {
    pub fn new(pool: Arc<Pool<Postgres>>) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &Pool<Postgres> {
        self.pool.as_ref()
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepo {
    async fn upsert_stats(&self, asset_id: Uuid, values: &AssetStatsValues) -> Result<()> {
        sqlx::query(
            r#"
                INSERT INTO asset_stats (asset_id, volatility, rsi, ma_50, ma_200, last_updated)
                VALUES ($1, $2, $3, $4, $5, now())
                ON CONFLICT (asset_id) DO UPDATE
                SET volatility = EXCLUDED.volatility,
                    rsi = EXCLUDED.rsi,
                    ma_50 = EXCLUDED.ma_50,
                    ma_200 = EXCLUDED.ma_200,
                    last_updated = now()
            "#,
        )
        .bind(asset_id)
        .bind(values.volatility)
        .bind(values.rsi)
        .bind(values.ma_50)
        .bind(values.ma_200)
        .execute(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(())
    }

    async fn get_for_asset(&self, asset_id: Uuid) -> Result<Option<AssetStatsRow>> {
        let row = sqlx::query_as::<_, AssetStatsRow>(
            r#"
                SELECT asset_id, volatility, rsi, ma_50, ma_200, last_updated
                FROM asset_stats
                WHERE asset_id = $1
            "#,
        )
        .bind(asset_id)
        .fetch_optional(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }
}
