use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::shared::AssetKind;

use super::super::{
    error::{DbError, Result},
    models::{AssetRow, NewAsset},
    repositories::AssetsRepository,
};

const ASSET_COLUMNS: &str = "id, ticker, name, kind, market_cap, created_at";

pub(crate) struct PgAssetsRepo {
    pool: Arc<Pool<Postgres>>,
}

impl PgAssetsRepo {
    pub fn new(pool: Arc<Pool<Postgres>>) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &Pool<Postgres> {
        self.pool.as_ref()
    }
}

#[async_trait]
impl AssetsRepository for PgAssetsRepo {
    async fn ensure_asset(&self, new_asset: &NewAsset) -> Result<AssetRow> {
        sqlx::query(
            r#"
                INSERT INTO assets (ticker, name, kind, market_cap)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (ticker) DO NOTHING
            "#,
        )
        .bind(new_asset.ticker.as_str())
        .bind(&new_asset.name)
        .bind(new_asset.kind)
        .bind(new_asset.market_cap)
        .execute(self.pool())
        .await
        .map_err(DbError::Query)?;

        self.get_by_ticker(new_asset.ticker.as_str())
            .await?
            .ok_or_else(|| DbError::AssetNotFound {
                ticker: new_asset.ticker.to_string(),
            })
    }

    async fn get_by_ticker(&self, ticker: &str) -> Result<Option<AssetRow>> {
        let row = sqlx::query_as::<_, AssetRow>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets WHERE ticker = $1"
        ))
        .bind(ticker.to_uppercase())
        .fetch_optional(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<AssetRow>> {
        let rows = sqlx::query_as::<_, AssetRow>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets ORDER BY ticker ASC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }

    async fn list_by_kind(&self, kind: AssetKind) -> Result<Vec<AssetRow>> {
        let rows = sqlx::query_as::<_, AssetRow>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets WHERE kind = $1 ORDER BY ticker ASC"
        ))
        .bind(kind)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }

    async fn update_market_cap(&self, asset_id: Uuid, market_cap: Option<f64>) -> Result<()> {
        sqlx::query("UPDATE assets SET market_cap = $2 WHERE id = $1")
            .bind(asset_id)
            .bind(market_cap)
            .execute(self.pool())
            .await
            .map_err(DbError::Query)?;

        Ok(())
    }

    async fn remove_asset(&self, asset_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(asset_id)
            .execute(self.pool())
            .await
            .map_err(DbError::Query)?;

        Ok(())
    }
}
