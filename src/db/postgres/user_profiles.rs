use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::shared::SubscriptionPlan;

use super::super::{
    error::{DbError, Result},
    models::{AssetRow, UserProfileRow},
    repositories::ProfilesRepository,
};

const PROFILE_COLUMNS: &str = "id, user_id, plan, created_at";

pub(crate) struct PgProfilesRepo {
    pool: Arc<Pool<Postgres>>,
}

impl PgProfilesRepo {
    pub fn new(pool: Arc<Pool<Postgres>>) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &Pool<Postgres> {
        self.pool.as_ref()
    }
}

#[async_trait]
impl ProfilesRepository for PgProfilesRepo {
    async fn ensure_profile(&self, user_id: Uuid) -> Result<UserProfileRow> {
        // ON CONFLICT keeps the existing row, including a non-default plan
        sqlx::query(
            r#"
                INSERT INTO user_profiles (user_id)
                VALUES ($1)
                ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(self.pool())
        .await
        .map_err(DbError::Query)?;

        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfileRow>> {
        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }

    async fn set_plan(&self, user_id: Uuid, plan: SubscriptionPlan) -> Result<()> {
        sqlx::query("UPDATE user_profiles SET plan = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(plan)
            .execute(self.pool())
            .await
            .map_err(DbError::Query)?;

        Ok(())
    }

    async fn toggle_favorite(&self, profile_id: Uuid, asset_id: Uuid) -> Result<bool> {
        let removed = sqlx::query(
            "DELETE FROM favorite_assets WHERE profile_id = $1 AND asset_id = $2",
        )
        .bind(profile_id)
        .bind(asset_id)
        .execute(self.pool())
        .await
        .map_err(DbError::Query)?
        .rows_affected();

        if removed > 0 {
            return Ok(false);
        }

        sqlx::query(
            r#"
                INSERT INTO favorite_assets (profile_id, asset_id)
                VALUES ($1, $2)
                ON CONFLICT (profile_id, asset_id) DO NOTHING
            "#,
        )
        .bind(profile_id)
        .bind(asset_id)
        .execute(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(true)
    }

    async fn list_favorites(&self, profile_id: Uuid) -> Result<Vec<AssetRow>> {
        let rows = sqlx::query_as::<_, AssetRow>(
            r#"
                SELECT a.id, a.ticker, a.name, a.kind, a.market_cap, a.created_at
                FROM assets a
                JOIN favorite_assets f ON f.asset_id = a.id
                WHERE f.profile_id = $1
                ORDER BY a.ticker ASC
            "#,
        )
        .bind(profile_id)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }
}
